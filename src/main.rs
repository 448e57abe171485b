//! FileMailer - Per-Recipient File Sender
//!
//! 受信者ごとのサブディレクトリのファイルを Mail.app で送信

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use filemailer::adapter::config::Config;
use filemailer::driver::{Args, FileMailerWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load_or_default(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = FileMailerWorkflow::new(config);

    workflow.execute(args).await?;

    Ok(())
}
