//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::config::{Config, TransportKind};
use crate::adapter::pacer::TokioPacer;
use crate::adapter::reporter::LogFailureReporter;
use crate::adapter::repositories::fs_recipient_repository::FsRecipientRepository;
use crate::adapter::repositories::json_settings_store::JsonSettingsStore;
use crate::adapter::repositories::memory_settings_store::MemorySettingsStore;
use crate::adapter::transport::{AppleScriptTransport, DryRunTransport, TransportContext};
use crate::application::dto::batch_report::BatchReport;
use crate::application::use_cases::dispatch_batch::{DispatchSettings, SendDispatcher};
use crate::application::use_cases::remember_defaults::{
    DefaultValues, DEFAULT_EXTENSION_KEY, DEFAULT_SENDER_KEY,
};
use crate::domain::repositories::mail_transport::MailTransport;
use crate::domain::repositories::settings_store::SettingsStore;

use super::cli::Args;

/// File Mailer Workflow
pub struct FileMailerWorkflow {
    config: Config,
}

impl FileMailerWorkflow {
    /// Create a new workflow instance with injected configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// `--no-save` のときは保存済みの値だけ読み、書き込みは捨てる
    async fn settings_store(&self, args: &Args) -> Result<Arc<dyn SettingsStore>> {
        let persistent = JsonSettingsStore::new(&self.config.defaults_path);
        if !args.no_save {
            return Ok(Arc::new(persistent));
        }

        let scratch = MemorySettingsStore::new();
        for key in [DEFAULT_SENDER_KEY, DEFAULT_EXTENSION_KEY] {
            if let Some(value) = persistent.get(key).await? {
                scratch.set(key, Some(&value)).await?;
            }
        }
        Ok(Arc::new(scratch))
    }

    fn transport(&self, args: &Args) -> Result<Arc<dyn MailTransport>> {
        let inner: Arc<dyn MailTransport> =
            if args.dry_run || self.config.transport == TransportKind::DryRun {
                println!("✓ Dry-run mode (not actually sending)");
                Arc::new(DryRunTransport::new())
            } else {
                Arc::new(AppleScriptTransport::new(self.config.osascript_path.clone()))
            };

        Ok(Arc::new(TransportContext::spawn(inner)?))
    }

    fn dispatch_settings(&self, args: &Args) -> DispatchSettings {
        let mut settings = self.config.dispatch_settings();
        if let Some(seconds) = args.pause_secs {
            settings.pause = Duration::from_secs(seconds);
        }
        settings
    }

    /// Execute the send workflow
    ///
    /// # Errors
    ///
    /// フォルダ未指定・フォルダが見つからない・設定ストアの読み書き失敗
    pub async fn execute(&self, args: Args) -> Result<BatchReport> {
        info!("Starting file mailer...");
        info!("Dry run: {}", args.dry_run);

        let input = args.send_input();
        let defaults = DefaultValues::new(self.settings_store(&args).await?);

        // フォルダの検証より先に保存する
        defaults.remember(&input).await?;
        let job = defaults.resolve(&input).await?;

        let settings = self.dispatch_settings(&args);
        println!("✓ Using configuration:");
        println!("  Folder: {}", job.root_directory());
        println!(
            "  Sender: {}",
            if job.sender_address().is_empty() {
                "(Mail.app default)"
            } else {
                job.sender_address()
            }
        );
        println!("  Subject: {}", job.subject_line());
        println!(
            "  Extension: {}",
            job.attachment_extension_filter().unwrap_or("(all files)")
        );
        println!("  Pause: {}s ({:?})", settings.pause.as_secs(), settings.pause_policy);

        let dispatcher = Arc::new(SendDispatcher::new(
            Arc::new(FsRecipientRepository::new()),
            self.transport(&args)?,
            Arc::new(TokioPacer),
            Arc::new(LogFailureReporter),
            settings,
        ));

        let handle = dispatcher.spawn(job);

        let cancel = handle.cancel_handle();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping after the current recipient");
                cancel.cancel();
            }
        });

        let result = handle.wait().await;
        interrupt.abort();
        let report = result?;

        println!(
            "✓ Sent {} message(s) ({} failed, {} skipped)",
            report.sent.len(),
            report.failures.len(),
            report.skipped.len()
        );
        for recipient in report.failed_recipients() {
            println!("⚠ Failed: {}", recipient);
        }
        for recipient in &report.skipped {
            println!("⚠ No attachments for {}", recipient);
        }
        if report.cancelled {
            println!("⚠ Cancelled before all recipients were processed");
        } else {
            println!("✓ Send complete!");
        }

        Ok(report)
    }
}
