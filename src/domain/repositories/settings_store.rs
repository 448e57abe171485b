//! # Settings Store Trait
//!
//! 前回の入力値（デフォルト値）の永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;

/// キーバリュー形式の設定ストア
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// 値を読み込む
    ///
    /// # Returns
    ///
    /// キーが存在しない場合は `None`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// 値を書き込む
    ///
    /// `None` を渡すとキーを削除する
    ///
    /// # Errors
    ///
    /// 永続化に失敗した場合にエラーを返す
    async fn set(&self, key: &str, value: Option<&str>) -> Result<()>;
}
