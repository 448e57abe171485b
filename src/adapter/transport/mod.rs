//! Mail Transports
//!
//! MailTransportの実装

pub mod apple_script;
pub mod context;
pub mod dry_run;

pub use apple_script::AppleScriptTransport;
pub use context::TransportContext;
pub use dry_run::DryRunTransport;
