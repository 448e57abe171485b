//! # Pacer Trait
//!
//! 送信間の待機を抽象化

use async_trait::async_trait;
use std::time::Duration;

/// 送信レートを抑えるための待機
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}
