//! # Attachment Filter
//!
//! 添付ファイルの選択ルール（純粋関数）

use std::path::{Path, PathBuf};

/// 隠しエントリ（ドットで始まる名前）かどうか
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// 拡張子フィルタ
///
/// 拡張子は大文字小文字を区別して完全一致で比較する（正規化しない）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttachmentFilter {
    extension: Option<String>,
}

impl AttachmentFilter {
    /// 空文字列はフィルタなしとして扱う
    pub fn from_extension(extension: Option<&str>) -> Self {
        Self {
            extension: extension
                .filter(|ext| !ext.is_empty())
                .map(str::to_string),
        }
    }

    /// 全ファイルを対象にするフィルタ
    pub fn all_files() -> Self {
        Self::default()
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// ファイルのパスが添付対象かどうか
    ///
    /// 呼び出し側はディレクトリを事前に除外しておくこと
    pub fn accepts(&self, path: &Path) -> bool {
        if is_hidden(path) {
            return false;
        }
        match &self.extension {
            Some(wanted) => path
                .extension()
                .map(|ext| ext.to_string_lossy() == wanted.as_str())
                .unwrap_or(false),
            None => true,
        }
    }

    /// 候補ファイルから添付ファイルを選び、パスの辞書順に並べる
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use filemailer::domain::services::attachment_filter::AttachmentFilter;
    ///
    /// let files = vec![
    ///     PathBuf::from("d/c.pdf"),
    ///     PathBuf::from("d/b.txt"),
    ///     PathBuf::from("d/a.pdf"),
    /// ];
    /// let selected = AttachmentFilter::from_extension(Some("pdf")).select(files);
    /// assert_eq!(selected, vec![PathBuf::from("d/a.pdf"), PathBuf::from("d/c.pdf")]);
    /// ```
    pub fn select(&self, candidates: Vec<PathBuf>) -> Vec<PathBuf> {
        let mut selected: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|path| self.accepts(path))
            .collect();
        selected.sort();
        selected
    }
}
