//! File System Recipient Repository
//!
//! RecipientRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::error::DispatchError;
use crate::domain::repositories::recipient_repository::RecipientRepository;
use crate::domain::services::attachment_filter::{is_hidden, AttachmentFilter};

/// ファイルシステムベースの受信者リポジトリ
pub struct FsRecipientRepository;

impl FsRecipientRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// 受信者サブディレクトリを列挙する（内部実装）
    fn scan_recipients_internal(root: &str) -> Result<Vec<PathBuf>, DispatchError> {
        let expanded_path = shellexpand::tilde(root);
        let root = PathBuf::from(expanded_path.as_ref());

        if !root.exists() {
            return Err(DispatchError::NotFound {
                path: root,
                reason: "does not exist".to_string(),
            });
        }
        if !root.is_dir() {
            return Err(DispatchError::NotFound {
                path: root,
                reason: "not a directory".to_string(),
            });
        }

        let mut recipients = Vec::new();

        for entry in WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                // ルート自体が読めない
                Err(e) if e.depth() == 0 => {
                    return Err(DispatchError::NotFound {
                        path: root,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if is_hidden(path) || !entry.file_type().is_dir() {
                continue;
            }
            recipients.push(path.to_path_buf());
        }

        recipients.sort();

        info!(
            "Found {} recipient directories in {}",
            recipients.len(),
            root.display()
        );

        Ok(recipients)
    }

    /// 添付ファイルを選択する（内部実装）
    fn select_attachments_internal(
        directory: &Path,
        filter: &AttachmentFilter,
    ) -> Result<Vec<PathBuf>> {
        let mut candidates = Vec::new();

        for entry in WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.context(format!(
                "Failed to read recipient directory: {}",
                directory.display()
            ))?;
            if entry.file_type().is_file() {
                candidates.push(entry.into_path());
            }
        }

        Ok(filter.select(candidates))
    }
}

#[async_trait]
impl RecipientRepository for FsRecipientRepository {
    async fn scan_recipients(&self, root: &str) -> Result<Vec<PathBuf>, DispatchError> {
        // 非同期なので、tokio::task::spawn_blockingでラップ
        let root = root.to_string();
        tokio::task::spawn_blocking(move || Self::scan_recipients_internal(&root))
            .await
            .map_err(|e| DispatchError::Task(format!("Failed to spawn blocking task: {}", e)))?
    }

    async fn select_attachments(
        &self,
        directory: &Path,
        filter: &AttachmentFilter,
    ) -> Result<Vec<PathBuf>> {
        let directory = directory.to_path_buf();
        let filter = filter.clone();
        tokio::task::spawn_blocking(move || Self::select_attachments_internal(&directory, &filter))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for FsRecipientRepository {
    fn default() -> Self {
        Self::new()
    }
}
