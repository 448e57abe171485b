//! # SendJob Entity
//!
//! 1回のバッチ送信を表す不変の入力

/// 件名が空のときに使う件名
pub const DEFAULT_SUBJECT: &str = "File attached";

/// バッチ送信ジョブ
///
/// 構築時に境界のルールを適用する：
/// 空の件名は [`DEFAULT_SUBJECT`] に、空の拡張子フィルタは `None` になる。
/// ルートディレクトリの検証はディスパッチャが行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendJob {
    sender_address: String,
    subject_line: String,
    root_directory: String,
    attachment_extension_filter: Option<String>,
}

impl SendJob {
    /// 新しいジョブを作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use filemailer::domain::entities::send_job::{SendJob, DEFAULT_SUBJECT};
    ///
    /// let job = SendJob::new("me@example.com", "", "/tmp/students", Some("pdf"));
    /// assert_eq!(job.subject_line(), DEFAULT_SUBJECT);
    /// assert_eq!(job.attachment_extension_filter(), Some("pdf"));
    ///
    /// let all_files = SendJob::new("me@example.com", "Grades", "/tmp/students", Some(""));
    /// assert_eq!(all_files.attachment_extension_filter(), None);
    /// ```
    pub fn new(
        sender_address: impl Into<String>,
        subject_line: impl Into<String>,
        root_directory: impl Into<String>,
        attachment_extension_filter: Option<&str>,
    ) -> Self {
        let subject_line = subject_line.into();
        let subject_line = if subject_line.is_empty() {
            DEFAULT_SUBJECT.to_string()
        } else {
            subject_line
        };

        Self {
            sender_address: sender_address.into(),
            subject_line,
            root_directory: root_directory.into(),
            attachment_extension_filter: attachment_extension_filter
                .filter(|ext| !ext.is_empty())
                .map(str::to_string),
        }
    }

    pub fn sender_address(&self) -> &str {
        &self.sender_address
    }

    pub fn subject_line(&self) -> &str {
        &self.subject_line
    }

    pub fn root_directory(&self) -> &str {
        &self.root_directory
    }

    pub fn attachment_extension_filter(&self) -> Option<&str> {
        self.attachment_extension_filter.as_deref()
    }

    /// ルートディレクトリが空白のみかどうか
    pub fn has_blank_root(&self) -> bool {
        self.root_directory.trim().is_empty()
    }
}
