//! Adapter Layer
//!
//! 外部システム（Mail.app, ファイルシステム, 設定ファイル）との統合

pub mod config;
pub mod pacer;
pub mod reporter;
pub mod repositories;
pub mod transport;
