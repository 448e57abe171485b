//! # Recipient Repository Trait
//!
//! 受信者サブディレクトリの走査と添付ファイル選択を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::error::DispatchError;
use crate::domain::services::attachment_filter::AttachmentFilter;

/// 受信者リポジトリ
///
/// ルート直下の受信者サブディレクトリの列挙（DirectoryScanner）と、
/// 各サブディレクトリ内の添付ファイル選択（AttachmentSelector）を担当する
#[async_trait]
pub trait RecipientRepository: Send + Sync {
    /// 受信者サブディレクトリを列挙する
    ///
    /// # Arguments
    ///
    /// * `root` - ルートディレクトリのパス
    ///
    /// # Returns
    ///
    /// パスの辞書順に並んだ直下のサブディレクトリ（隠しエントリを除く）
    ///
    /// # Errors
    ///
    /// ルートが存在しない、読めない、ディレクトリではない場合に `DispatchError::NotFound`
    async fn scan_recipients(&self, root: &str) -> Result<Vec<PathBuf>, DispatchError>;

    /// 添付ファイルを選択する
    ///
    /// # Arguments
    ///
    /// * `directory` - 受信者サブディレクトリ
    /// * `filter` - 拡張子フィルタ
    ///
    /// # Returns
    ///
    /// パスの辞書順に並んだ添付ファイル。該当なしは空のベクター
    async fn select_attachments(
        &self,
        directory: &Path,
        filter: &AttachmentFilter,
    ) -> Result<Vec<PathBuf>>;
}
