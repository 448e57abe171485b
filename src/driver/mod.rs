//! # Driver Layer
//!
//! コマンドラインから送信バッチを起動する
//!
//! 設定ファイルとCLI引数から具体的なアダプタ（AppleScript/dry-run トランスポート、
//! JSON設定ストア、ファイルシステムの受信者リポジトリ）を選び、
//! ディスパッチャに注入して実行する。Ctrl-C はバッチのキャンセルに変換する。
//!
//! - **cli**: clap による引数定義
//! - **workflow**: 組み立てと実行、結果サマリーの表示

pub mod cli;
pub mod workflow;

pub use cli::Args;
pub use workflow::FileMailerWorkflow;
