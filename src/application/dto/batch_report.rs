//! # Batch Report DTO
//!
//! 1回のバッチ送信の結果サマリー

use chrono::{DateTime, Utc};

use crate::domain::error::DispatchError;

/// バッチ送信結果のサマリー
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// ログ相関用のバッチID
    pub batch_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// 送信に成功した受信者
    pub sent: Vec<String>,
    /// 送信に失敗した受信者（`DispatchError::Transport`）
    pub failures: Vec<DispatchError>,
    /// 添付ファイルがなくスキップした受信者
    pub skipped: Vec<String>,
    /// 実行した待機の回数
    pub pauses: usize,
    /// 途中でキャンセルされたかどうか
    pub cancelled: bool,
}

impl BatchReport {
    pub fn start() -> Self {
        Self {
            batch_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            finished_at: None,
            sent: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
            pauses: 0,
            cancelled: false,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// トランスポートを呼び出した回数
    pub fn attempted(&self) -> usize {
        self.sent.len() + self.failures.len()
    }

    /// 失敗した受信者アドレス
    pub fn failed_recipients(&self) -> Vec<&str> {
        self.failures
            .iter()
            .filter_map(|err| match err {
                DispatchError::Transport { recipient, .. } => Some(recipient.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}
