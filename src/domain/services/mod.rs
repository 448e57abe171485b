//! # Domain Services
//!
//! エンティティに属さないビジネスルール
//!
//! - **attachment_filter**: 添付ファイルの選択ルール
//! - **message_composer**: 送信要求の組み立て

pub mod attachment_filter;
pub mod message_composer;
