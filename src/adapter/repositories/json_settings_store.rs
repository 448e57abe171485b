//! JSON Settings Store Implementation
//!
//! SettingsStoreのJSON実装（デフォルト値をJSONファイルで永続化）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::repositories::settings_store::SettingsStore;

/// JSONファイルベースの設定ストア
///
/// 書き込みのたびにファイル全体を読み直して保存する（write-through）
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    /// 新しいストアを作成（`~` はホームディレクトリに展開される）
    pub fn new(path: &str) -> Self {
        let expanded_path = shellexpand::tilde(path);
        Self {
            path: PathBuf::from(expanded_path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルから値を読み込む（同期処理）
    fn load_sync(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            debug!("No settings file at {}, using empty defaults", path.display());
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path).context("Failed to read settings file")?;

        let values: BTreeMap<String, String> =
            serde_json::from_str(&content).context("Failed to parse settings JSON")?;

        Ok(values)
    }

    /// ファイルに値を保存する（同期処理）
    fn save_sync(path: &Path, values: &BTreeMap<String, String>) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let json = serde_json::to_string_pretty(values).context("Failed to serialize settings")?;

        fs::write(path, json).context("Failed to write settings file")?;

        Ok(())
    }

    fn set_sync(path: &Path, key: &str, value: Option<&str>) -> Result<()> {
        let mut values = Self::load_sync(path)?;
        match value {
            Some(value) => {
                values.insert(key.to_string(), value.to_string());
            }
            None => {
                values.remove(key);
            }
        }
        Self::save_sync(path, &values)?;
        info!("Saved setting {} to {}", key, path.display());
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path.clone();
        let values = tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Option<&str>) -> Result<()> {
        let path = self.path.clone();
        let key = key.to_string();
        let value = value.map(str::to_string);
        tokio::task::spawn_blocking(move || Self::set_sync(&path, &key, value.as_deref()))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(())
    }
}
