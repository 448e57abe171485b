//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **SendJob**: 1回のバッチ送信の入力
//! - **RecipientEntry**: 受信者サブディレクトリと添付ファイル
//! - **SendRequest / SendOutcome**: トランスポートへの要求と結果
//! - **DispatchState / PausePolicy**: ディスパッチャの状態とペーシング方針

pub mod dispatch_state;
pub mod recipient_entry;
pub mod send_job;
pub mod send_request;
