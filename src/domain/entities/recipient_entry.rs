//! # RecipientEntry Entity
//!
//! 受信者サブディレクトリ1つ分の送信対象

use std::path::{Path, PathBuf};

/// 受信者エントリ
///
/// アドレスはサブディレクトリのベース名そのもの（正規化も検証もしない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientEntry {
    pub recipient_address: String,
    pub attachment_paths: Vec<PathBuf>,
}

impl RecipientEntry {
    pub fn new(recipient_address: impl Into<String>, attachment_paths: Vec<PathBuf>) -> Self {
        Self {
            recipient_address: recipient_address.into(),
            attachment_paths,
        }
    }

    /// サブディレクトリと選択済みの添付ファイルからエントリを作成
    ///
    /// # Returns
    ///
    /// 添付ファイルが空、またはディレクトリ名を取得できない場合は `None`
    pub fn from_directory(directory: &Path, attachment_paths: Vec<PathBuf>) -> Option<Self> {
        if attachment_paths.is_empty() {
            return None;
        }
        let address = recipient_address_of(directory)?;
        Some(Self::new(address, attachment_paths))
    }

    /// 送信対象になるかどうか
    #[inline]
    pub fn is_eligible(&self) -> bool {
        !self.attachment_paths.is_empty()
    }
}

/// サブディレクトリのパスから受信者アドレスを取り出す
pub fn recipient_address_of(directory: &Path) -> Option<String> {
    directory
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_directory_uses_base_name_verbatim() {
        let entry = RecipientEntry::from_directory(
            Path::new("/root/Alice.Smith@Example.COM"),
            vec![PathBuf::from("/root/Alice.Smith@Example.COM/a.pdf")],
        )
        .unwrap();

        assert_eq!(entry.recipient_address, "Alice.Smith@Example.COM");
        assert!(entry.is_eligible());
    }

    #[test]
    fn test_from_directory_without_attachments() {
        let entry = RecipientEntry::from_directory(Path::new("/root/bob@example.com"), vec![]);
        assert!(entry.is_none());
    }

    #[test]
    fn test_recipient_address_of_root() {
        assert_eq!(recipient_address_of(Path::new("/")), None);
        assert_eq!(
            recipient_address_of(Path::new("dir/not-an-address")),
            Some("not-an-address".to_string())
        );
    }
}
