//! # Send Input DTO
//!
//! 呼び出し側（CLI/UI）から受け取る生の入力

/// 送信フォームの入力値
///
/// すべて空文字列を許容する。空の値の扱いは `DefaultValues::resolve` が決める
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendInput {
    /// 送信元アカウント（空なら保存済みのデフォルト）
    pub sender: String,
    /// 件名（空なら "File attached"）
    pub subject: String,
    /// 受信者サブディレクトリを含むフォルダ（必須）
    pub folder: String,
    /// 拡張子フィルタ（空なら保存済みのデフォルト、それも空ならフィルタなし）
    pub extension: String,
    /// 保存済みの拡張子デフォルトを無視して全ファイルを添付する
    pub all_files: bool,
}

impl SendInput {
    pub fn new(
        sender: impl Into<String>,
        subject: impl Into<String>,
        folder: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            subject: subject.into(),
            folder: folder.into(),
            extension: extension.into(),
            all_files: false,
        }
    }

    pub fn with_all_files(mut self, all_files: bool) -> Self {
        self.all_files = all_files;
        self
    }
}
