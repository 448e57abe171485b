//! # Dispatch State
//!
//! ディスパッチャの状態機械とペーシング方針

use serde::{Deserialize, Serialize};
use std::fmt;

/// ディスパッチャの状態
///
/// `Idle → Running → (Building → Sending → Pausing)* → Completed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Running,
    Building,
    Sending,
    Pausing,
    Completed,
}

impl DispatchState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, DispatchState::Completed)
    }
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DispatchState::Idle => "idle",
            DispatchState::Running => "running",
            DispatchState::Building => "building",
            DispatchState::Sending => "sending",
            DispatchState::Pausing => "pausing",
            DispatchState::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// 送信間の待機方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PausePolicy {
    /// 送信と送信の間だけ待機する（N件の送信でN-1回）
    #[default]
    BetweenSends,
    /// 最後の送信を含め、毎回の送信後に待機する（N件の送信でN回）
    AfterEverySend,
}
