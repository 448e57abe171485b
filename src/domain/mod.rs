//! # Domain Layer
//!
//! このモジュールはバッチ送信の核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - ファイルシステムやメールアプリについて何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（SendJob, RecipientEntry, SendRequestなど）
//! - **repositories**: ポートとなるtrait（インターフェース定義のみ）
//! - **services**: Domain Service（添付ファイル選択とメッセージ組み立て）
//! - **error**: バッチ全体のエラー分類

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
