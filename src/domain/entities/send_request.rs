//! # SendRequest / SendOutcome
//!
//! メールトランスポートへの要求と、その結果

use std::path::PathBuf;

use crate::domain::error::DispatchError;

/// トランスポートが成功を示すときに返す文字列
///
/// Mail.app の `send` は `true` を返す
pub const SUCCESS_SENTINEL: &str = "true";

/// 送信要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub sender: String,
    pub subject: String,
    pub recipient: String,
    pub attachments: Vec<PathBuf>,
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub recipient: String,
    pub success: bool,
    pub diagnostic: Option<String>,
}

impl SendOutcome {
    /// 診断メッセージなしの成功
    pub fn success(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            success: true,
            diagnostic: None,
        }
    }

    /// トランスポートが正常終了し、出力テキストを返した
    ///
    /// 出力が [`SUCCESS_SENTINEL`] 以外なら失敗として扱われる
    pub fn completed(recipient: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            success: true,
            diagnostic: Some(output.into()),
        }
    }

    /// 失敗
    pub fn failure(recipient: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            success: false,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// 失敗とみなすかどうか
    ///
    /// 成功フラグが `false`、または診断メッセージがあってセンチネルと一致しない場合
    ///
    /// ```
    /// use filemailer::domain::entities::send_request::SendOutcome;
    ///
    /// assert!(!SendOutcome::success("a@example.com").is_failure());
    /// assert!(!SendOutcome::completed("a@example.com", "true").is_failure());
    /// assert!(SendOutcome::completed("a@example.com", "false").is_failure());
    /// assert!(SendOutcome::failure("a@example.com", "boom").is_failure());
    /// ```
    pub fn is_failure(&self) -> bool {
        if !self.success {
            return true;
        }
        matches!(&self.diagnostic, Some(text) if text != SUCCESS_SENTINEL)
    }

    /// 失敗なら `DispatchError::Transport` に変換
    pub fn into_error(self) -> Option<DispatchError> {
        if !self.is_failure() {
            return None;
        }
        Some(DispatchError::Transport {
            recipient: self.recipient,
            diagnostic: self.diagnostic.unwrap_or_default(),
        })
    }
}
