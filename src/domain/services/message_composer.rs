//! # Message Composer
//!
//! RecipientEntry から SendRequest を組み立てる

use crate::domain::entities::recipient_entry::RecipientEntry;
use crate::domain::entities::send_request::SendRequest;

/// メッセージ組み立てサービス
pub struct MessageComposer;

impl MessageComposer {
    /// 送信要求を作成します。
    ///
    /// 件名のデフォルト値は `SendJob` 構築時に適用済みなので、ここでは何もしない
    ///
    /// # 例
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use filemailer::domain::entities::recipient_entry::RecipientEntry;
    /// use filemailer::domain::services::message_composer::MessageComposer;
    ///
    /// let entry = RecipientEntry::new("bob@example.com", vec![PathBuf::from("/r/bob@example.com/a.pdf")]);
    /// let request = MessageComposer::compose("me@example.com", "Results", entry);
    ///
    /// assert_eq!(request.recipient, "bob@example.com");
    /// assert_eq!(request.attachments.len(), 1);
    /// ```
    pub fn compose(sender: &str, subject: &str, entry: RecipientEntry) -> SendRequest {
        SendRequest {
            sender: sender.to_string(),
            subject: subject.to_string(),
            recipient: entry.recipient_address,
            attachments: entry.attachment_paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_compose_keeps_attachment_order() {
        let entry = RecipientEntry::new(
            "carol@example.com",
            vec![
                PathBuf::from("/r/carol@example.com/a.pdf"),
                PathBuf::from("/r/carol@example.com/c.pdf"),
            ],
        );

        let request = MessageComposer::compose("me@example.com", "Grades", entry);

        assert_eq!(
            request,
            SendRequest {
                sender: "me@example.com".to_string(),
                subject: "Grades".to_string(),
                recipient: "carol@example.com".to_string(),
                attachments: vec![
                    PathBuf::from("/r/carol@example.com/a.pdf"),
                    PathBuf::from("/r/carol@example.com/c.pdf"),
                ],
            }
        );
    }

    #[test]
    fn test_compose_allows_empty_sender() {
        let entry = RecipientEntry::new("dave@example.com", vec![PathBuf::from("x")]);
        let request = MessageComposer::compose("", "File attached", entry);
        assert_eq!(request.sender, "");
    }
}
