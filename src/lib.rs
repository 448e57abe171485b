//! # FileMailer
//!
//! 受信者アドレスを名前に持つサブディレクトリごとに、中のファイルを添付して
//! Mail.app から1通ずつ送信するツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: 送信ジョブ・受信者・添付ファイル選択のルール（外部依存なし）
//! - **Application層**: バッチ送信とデフォルト値の保存（ユースケース）
//! - **Adapter層**: 外部システムとの統合（Mail.app, ファイルシステム等）
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部プロセス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
