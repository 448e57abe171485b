//! # Dispatch Errors
//!
//! バッチ送信のエラー分類
//!
//! - `Configuration` / `NotFound` はバッチ全体を中断する
//! - `Transport` は受信者ごとに記録され、バッチは継続する

use std::path::PathBuf;
use thiserror::Error;

/// バッチ送信エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// 必須入力（ルートディレクトリ）が欠けている。I/Oの前に検出される
    #[error("configuration error: {0}")]
    Configuration(String),

    /// ルートディレクトリが存在しない、読めない、またはディレクトリではない
    #[error("root directory not found: {} ({reason})", path.display())]
    NotFound { path: PathBuf, reason: String },

    /// 1件の送信が失敗した
    #[error("send to {recipient} failed: {diagnostic}")]
    Transport {
        recipient: String,
        diagnostic: String,
    },

    /// バッチを実行するタスク自体が異常終了した
    #[error("batch task failed: {0}")]
    Task(String),
}

impl DispatchError {
    /// バッチ全体を中断させるエラーかどうか
    pub fn is_batch_fatal(&self) -> bool {
        !matches!(self, DispatchError::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = DispatchError::NotFound {
            path: PathBuf::from("/missing/root"),
            reason: "does not exist".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "root directory not found: /missing/root (does not exist)"
        );
    }

    #[test]
    fn test_transport_display_contains_recipient() {
        let err = DispatchError::Transport {
            recipient: "bob@example.com".to_string(),
            diagnostic: "error: Mail got an error".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("bob@example.com"));
        assert!(msg.contains("Mail got an error"));
    }

    #[test]
    fn test_is_batch_fatal() {
        assert!(DispatchError::Configuration("blank".to_string()).is_batch_fatal());
        assert!(DispatchError::Task("panicked".to_string()).is_batch_fatal());
        assert!(!DispatchError::Transport {
            recipient: "a@example.com".to_string(),
            diagnostic: "x".to_string(),
        }
        .is_batch_fatal());
    }
}
