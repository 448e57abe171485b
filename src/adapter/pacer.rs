//! Tokio Pacer
//!
//! Pacerのtokio実装

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::repositories::pacer::Pacer;

/// `tokio::time::sleep` で待機する
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
