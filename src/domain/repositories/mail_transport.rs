//! # Mail Transport Trait
//!
//! 実際の送信処理を抽象化

use async_trait::async_trait;

use crate::domain::entities::send_request::{SendOutcome, SendRequest};

/// メールトランスポート
///
/// 送信が終わるまで待ってから結果を返す。
/// 実装内部のエラーは失敗の [`SendOutcome`] として返す
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, request: &SendRequest) -> SendOutcome;
}
