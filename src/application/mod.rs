//! # Application Layer
//!
//! バッチ送信とデフォルト値の保存を組み立てる層
//!
//! Domain層のポート（RecipientRepository, MailTransport, Pacer など）だけに依存し、
//! Mail.app やファイルシステムの実装は Adapter層から注入される。
//!
//! - **dto**: CLIから受け取る入力（SendInput）とバッチ結果（BatchReport）
//! - **use_cases**: SendDispatcher, バッチ制御（キャンセル・状態通知）, DefaultValues

pub mod dto;
pub mod use_cases;
