//! # Remember Defaults Use Case
//!
//! 送信元アドレスと拡張子のデフォルト値を設定ストアに保存・復元する

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::application::dto::send_input::SendInput;
use crate::domain::entities::send_job::SendJob;
use crate::domain::repositories::settings_store::SettingsStore;

pub const DEFAULT_SENDER_KEY: &str = "defaultSender";
pub const DEFAULT_EXTENSION_KEY: &str = "defaultExtension";

/// デフォルト値
///
/// 読み込みは毎回ストアから行い、書き込みは即座にストアへ反映する
pub struct DefaultValues<S: SettingsStore + ?Sized> {
    store: Arc<S>,
}

impl<S: SettingsStore + ?Sized> DefaultValues<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 保存済みの送信元アドレス（未保存なら空文字列）
    pub async fn sender(&self) -> Result<String> {
        Ok(self
            .store
            .get(DEFAULT_SENDER_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn set_sender(&self, sender: Option<&str>) -> Result<()> {
        self.store.set(DEFAULT_SENDER_KEY, sender).await
    }

    /// 保存済みの拡張子（未保存なら空文字列）
    pub async fn extension(&self) -> Result<String> {
        Ok(self
            .store
            .get(DEFAULT_EXTENSION_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn set_extension(&self, extension: Option<&str>) -> Result<()> {
        self.store.set(DEFAULT_EXTENSION_KEY, extension).await
    }

    /// 空でない入力値を次回のデフォルトとして保存する
    ///
    /// # Errors
    ///
    /// ストアへの書き込みに失敗した場合にエラーを返す
    pub async fn remember(&self, input: &SendInput) -> Result<()> {
        if !input.sender.is_empty() {
            self.set_sender(Some(&input.sender)).await?;
            info!("Saved default sender: {}", input.sender);
        }
        if !input.extension.is_empty() {
            self.set_extension(Some(&input.extension)).await?;
            info!("Saved default extension: {}", input.extension);
        }
        Ok(())
    }

    /// 入力値の空欄をデフォルトで埋めて SendJob を作成する
    ///
    /// # Arguments
    ///
    /// * `input` - フォームの入力値
    ///
    /// # Returns
    ///
    /// 件名の既定値と拡張子フィルタを適用済みのジョブ
    pub async fn resolve(&self, input: &SendInput) -> Result<SendJob> {
        let sender = if input.sender.is_empty() {
            self.sender().await?
        } else {
            input.sender.clone()
        };

        let extension = if input.all_files {
            String::new()
        } else if input.extension.is_empty() {
            self.extension().await?
        } else {
            input.extension.clone()
        };

        Ok(SendJob::new(
            sender,
            input.subject.clone(),
            input.folder.clone(),
            Some(extension.as_str()),
        ))
    }
}
