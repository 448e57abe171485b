//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **SendDispatcher**: 受信者ごとの逐次送信（バッチ送信の中核）
//! - **DefaultValues**: 送信元と拡張子のデフォルト値の保存・復元

pub mod batch_control;
pub mod dispatch_batch;
pub mod remember_defaults;
