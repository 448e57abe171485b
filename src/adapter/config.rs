//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::application::use_cases::dispatch_batch::DispatchSettings;
use crate::domain::entities::dispatch_state::PausePolicy;

/// 使用するメールトランスポート
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Mail.app を AppleScript で操作する
    #[default]
    AppleScript,
    /// 送信せずにログへ出力する
    DryRun,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// 送信間の待機秒数
    pub pause_seconds: u64,
    pub pause_policy: PausePolicy,
    pub transport: TransportKind,
    /// AppleScriptを実行するコマンド
    pub osascript_path: String,
    /// デフォルト値（送信元と拡張子）の保存先
    pub defaults_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pause_seconds: 10,
            pause_policy: PausePolicy::BetweenSends,
            transport: TransportKind::AppleScript,
            osascript_path: "osascript".to_string(),
            defaults_path: "~/.config/filemailer/defaults.json".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        Ok(config)
    }

    /// 設定ファイルがなければデフォルト設定を使う
    pub fn load_or_default(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        if !Path::new(expanded_path.as_ref()).exists() {
            info!("No config file at {}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(expanded_path.as_ref())
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            pause: Duration::from_secs(self.pause_seconds),
            pause_policy: self.pause_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "pause_seconds": 3, "transport": "dry_run" }"#)
            .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.pause_seconds, 3);
        assert_eq!(config.transport, TransportKind::DryRun);
        assert_eq!(config.pause_policy, PausePolicy::BetweenSends);
        assert_eq!(config.osascript_path, "osascript");
    }

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{
            "pause_seconds": 5,
            "pause_policy": "after_every_send",
            "transport": "apple_script",
            "osascript_path": "/usr/bin/osascript",
            "defaults_path": "/tmp/defaults.json"
        }"#;
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.pause_policy, PausePolicy::AfterEverySend);
        assert_eq!(config.osascript_path, "/usr/bin/osascript");
        assert_eq!(config.defaults_path, "/tmp/defaults.json");
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(Config::load("/nonexistent/config.json").is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        let config = Config::load_or_default(path.to_str().unwrap()).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_transport_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "transport": "carrier_pigeon" }"#).unwrap();

        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_dispatch_settings() {
        let config = Config {
            pause_seconds: 7,
            ..Config::default()
        };

        let settings = config.dispatch_settings();

        assert_eq!(settings.pause, Duration::from_secs(7));
        assert_eq!(settings.pause_policy, PausePolicy::BetweenSends);
    }
}
