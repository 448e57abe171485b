//! # Failure Reporter Trait
//!
//! 送信失敗をオペレーターに見える場所へ出力する

#[cfg(test)]
use mockall::automock;

/// 送信失敗の報告先
///
/// 失敗1件につき1行（受信者アドレスと診断メッセージ）
#[cfg_attr(test, automock)]
pub trait FailureReporter: Send + Sync {
    fn report(&self, recipient: &str, diagnostic: &str);
}
