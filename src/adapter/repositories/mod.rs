//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod fs_recipient_repository;
pub mod json_settings_store;
pub mod memory_settings_store;
