//! Transport Context
//!
//! すべての送信を専用スレッド上の単一ランタイムで順番に実行する。
//! ディスパッチャ側のタスクがどのワーカーで動いていても、
//! トランスポートは常に同じスレッドから呼ばれる。

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use std::thread;
use tokio::sync::{mpsc, oneshot};

use crate::domain::entities::send_request::{SendOutcome, SendRequest};
use crate::domain::repositories::mail_transport::MailTransport;

pub const TRANSPORT_THREAD_NAME: &str = "mail-transport";

type Job = (SendRequest, oneshot::Sender<SendOutcome>);

/// 専用スレッドへ送信要求を渡すトランスポート
///
/// 最後のハンドルが破棄されるとスレッドも終了する
pub struct TransportContext {
    sender: mpsc::UnboundedSender<Job>,
}

impl TransportContext {
    /// 専用スレッドを起動する
    ///
    /// # Errors
    ///
    /// ランタイムの構築またはスレッドの起動に失敗した場合
    pub fn spawn(inner: Arc<dyn MailTransport>) -> Result<Self> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build transport runtime")?;

        thread::Builder::new()
            .name(TRANSPORT_THREAD_NAME.to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some((request, reply)) = receiver.recv().await {
                        let outcome = inner.send(&request).await;
                        if reply.send(outcome).is_err() {
                            warn!("Send result for {} was not collected", request.recipient);
                        }
                    }
                    debug!("Transport context stopped");
                });
            })
            .context("Failed to spawn transport thread")?;

        Ok(Self { sender })
    }
}

#[async_trait]
impl MailTransport for TransportContext {
    async fn send(&self, request: &SendRequest) -> SendOutcome {
        let (reply, response) = oneshot::channel();

        if self.sender.send((request.clone(), reply)).is_err() {
            return SendOutcome::failure(&request.recipient, "error: transport context is closed");
        }

        match response.await {
            Ok(outcome) => outcome,
            Err(_) => SendOutcome::failure(
                &request.recipient,
                "error: transport context stopped before replying",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ThreadRecordingTransport {
        threads: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl MailTransport for ThreadRecordingTransport {
        async fn send(&self, request: &SendRequest) -> SendOutcome {
            let name = thread::current().name().map(str::to_string);
            self.threads.lock().unwrap().push(name);
            SendOutcome::completed(&request.recipient, "true")
        }
    }

    struct PanickingTransport;

    #[async_trait]
    impl MailTransport for PanickingTransport {
        async fn send(&self, _request: &SendRequest) -> SendOutcome {
            panic!("scripting bridge crashed");
        }
    }

    fn request(recipient: &str) -> SendRequest {
        SendRequest {
            sender: String::new(),
            subject: "File attached".to_string(),
            recipient: recipient.to_string(),
            attachments: vec![],
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_all_sends_run_on_the_transport_thread() {
        let inner = Arc::new(ThreadRecordingTransport {
            threads: Mutex::new(Vec::new()),
        });
        let context = Arc::new(TransportContext::spawn(inner.clone()).unwrap());

        let mut handles = Vec::new();
        for recipient in ["a@example.com", "b@example.com", "c@example.com"] {
            let context = context.clone();
            handles.push(tokio::spawn(async move {
                context.send(&request(recipient)).await
            }));
        }
        for handle in handles {
            let outcome = handle.await.unwrap();
            assert!(!outcome.is_failure());
        }

        let threads = inner.threads.lock().unwrap();
        assert_eq!(threads.len(), 3);
        assert!(threads
            .iter()
            .all(|name| name.as_deref() == Some(TRANSPORT_THREAD_NAME)));
    }

    #[tokio::test]
    async fn test_outcome_is_forwarded_unchanged() {
        let inner = Arc::new(ThreadRecordingTransport {
            threads: Mutex::new(Vec::new()),
        });
        let context = TransportContext::spawn(inner).unwrap();

        let outcome = context.send(&request("bob@example.com")).await;

        assert_eq!(outcome, SendOutcome::completed("bob@example.com", "true"));
    }

    #[tokio::test]
    async fn test_crashed_transport_yields_failures() {
        let context = TransportContext::spawn(Arc::new(PanickingTransport)).unwrap();

        let first = context.send(&request("a@example.com")).await;
        let second = context.send(&request("b@example.com")).await;

        assert!(first.is_failure());
        assert!(second.is_failure());
        assert_eq!(second.recipient, "b@example.com");
    }
}
