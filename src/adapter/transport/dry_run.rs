//! Dry-Run Mail Transport
//!
//! 実際には送信せず、送信内容を表示するだけのトランスポート

use async_trait::async_trait;
use log::info;

use crate::domain::entities::send_request::{SendOutcome, SendRequest};
use crate::domain::repositories::mail_transport::MailTransport;

#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunTransport;

impl DryRunTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailTransport for DryRunTransport {
    async fn send(&self, request: &SendRequest) -> SendOutcome {
        info!(
            "[dry-run] {} -> {} ({} attachment(s))",
            request.sender,
            request.recipient,
            request.attachments.len()
        );
        println!(
            "  Would send \"{}\" to {}",
            request.subject, request.recipient
        );
        for path in &request.attachments {
            println!("    - {}", path.display());
        }

        SendOutcome::success(&request.recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_dry_run_always_succeeds() {
        let request = SendRequest {
            sender: String::new(),
            subject: "File attached".to_string(),
            recipient: "alice@example.com".to_string(),
            attachments: vec![PathBuf::from("/data/alice@example.com/a.pdf")],
        };

        let outcome = DryRunTransport::new().send(&request).await;

        assert_eq!(outcome, SendOutcome::success("alice@example.com"));
        assert!(!outcome.is_failure());
    }
}
