//! # Dispatch Batch Use Case
//!
//! 受信者サブディレクトリごとにメールを1通ずつ送信するユースケース

use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::application::dto::batch_report::BatchReport;
use crate::application::use_cases::batch_control::{
    cancellation, BatchHandle, CancelToken,
};
use crate::domain::entities::dispatch_state::{DispatchState, PausePolicy};
use crate::domain::entities::recipient_entry::{recipient_address_of, RecipientEntry};
use crate::domain::entities::send_job::SendJob;
use crate::domain::entities::send_request::SendOutcome;
use crate::domain::error::DispatchError;
use crate::domain::repositories::failure_reporter::FailureReporter;
use crate::domain::repositories::mail_transport::MailTransport;
use crate::domain::repositories::pacer::Pacer;
use crate::domain::repositories::recipient_repository::RecipientRepository;
use crate::domain::services::attachment_filter::AttachmentFilter;
use crate::domain::services::message_composer::MessageComposer;

/// 送信間の既定の待機時間
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(10);

/// ディスパッチャの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    pub pause: Duration,
    pub pause_policy: PausePolicy,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            pause: DEFAULT_PAUSE,
            pause_policy: PausePolicy::default(),
        }
    }
}

/// バッチ送信ディスパッチャ
///
/// 受信者は1件ずつ順番に処理する（並列送信はしない）。
/// 送信失敗は記録して次の受信者に進み、リトライはしない。
pub struct SendDispatcher<R: RecipientRepository> {
    recipient_repository: Arc<R>,
    transport: Arc<dyn MailTransport>,
    pacer: Arc<dyn Pacer>,
    reporter: Arc<dyn FailureReporter>,
    settings: DispatchSettings,
}

impl<R: RecipientRepository + 'static> SendDispatcher<R> {
    /// 新しいディスパッチャを作成
    ///
    /// # Arguments
    ///
    /// * `recipient_repository` - 受信者ディレクトリの走査と添付ファイル選択
    /// * `transport` - 送信に使うトランスポート（専用コンテキストでラップしてもよい）
    /// * `pacer` - 送信間の待機
    /// * `reporter` - 送信失敗の出力先
    /// * `settings` - 待機時間と待機方針
    pub fn new(
        recipient_repository: Arc<R>,
        transport: Arc<dyn MailTransport>,
        pacer: Arc<dyn Pacer>,
        reporter: Arc<dyn FailureReporter>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            recipient_repository,
            transport,
            pacer,
            reporter,
            settings,
        }
    }

    pub fn settings(&self) -> DispatchSettings {
        self.settings
    }

    /// バッチを別タスクで起動する
    ///
    /// 返された [`BatchHandle`] で完了待ちとキャンセルを行う
    pub fn spawn(self: Arc<Self>, job: SendJob) -> BatchHandle {
        let (cancel, token) = cancellation();
        let (state_tx, state_rx) = watch::channel(DispatchState::Idle);

        let join = tokio::spawn(async move { self.run_with(&job, &token, &state_tx).await });

        BatchHandle::new(join, cancel, state_rx)
    }

    /// キャンセルなしでバッチを実行する
    pub async fn run(&self, job: &SendJob) -> Result<BatchReport, DispatchError> {
        let (_cancel, token) = cancellation();
        let (state_tx, _state_rx) = watch::channel(DispatchState::Idle);
        self.run_with(job, &token, &state_tx).await
    }

    /// バッチを実行する
    ///
    /// # Arguments
    ///
    /// * `job` - 送信ジョブ
    /// * `cancel` - 受信者の間でのみ確認されるキャンセル要求
    /// * `state` - 状態遷移の通知先。どの経路で終わっても最後は `Completed`
    ///
    /// # Errors
    ///
    /// ルートが空白なら `Configuration`、ルートが見つからなければ `NotFound`。
    /// 個々の送信失敗はエラーにならず、レポートに記録される
    pub async fn run_with(
        &self,
        job: &SendJob,
        cancel: &CancelToken,
        state: &watch::Sender<DispatchState>,
    ) -> Result<BatchReport, DispatchError> {
        let result = self.dispatch(job, cancel, state).await;
        transition(state, DispatchState::Completed);
        result
    }

    async fn dispatch(
        &self,
        job: &SendJob,
        cancel: &CancelToken,
        state: &watch::Sender<DispatchState>,
    ) -> Result<BatchReport, DispatchError> {
        // I/Oより前に検証する
        if job.has_blank_root() {
            return Err(DispatchError::Configuration(
                "a folder containing the recipient subdirectories is required".to_string(),
            ));
        }

        transition(state, DispatchState::Running);
        let mut report = BatchReport::start();
        info!(
            "Starting batch {} in {}",
            report.batch_id,
            job.root_directory()
        );

        let recipients = self
            .recipient_repository
            .scan_recipients(job.root_directory())
            .await?;
        info!("Found {} recipient directories", recipients.len());

        let filter = AttachmentFilter::from_extension(job.attachment_extension_filter());

        // BetweenSends では次に送る受信者が見つかってから待機する。
        // 最後の送信の後には待機しない
        let mut pause_pending = false;

        for directory in recipients {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            transition(state, DispatchState::Building);
            let Some(entry) = self.build_entry(&directory, &filter, &mut report).await else {
                continue;
            };

            if pause_pending {
                pause_pending = false;
                if !self.pause(cancel, state, &mut report).await {
                    report.cancelled = true;
                    break;
                }
            }

            let request =
                MessageComposer::compose(job.sender_address(), job.subject_line(), entry);

            transition(state, DispatchState::Sending);
            debug!(
                "Sending to {} with {} attachment(s)",
                request.recipient,
                request.attachments.len()
            );
            let outcome = self.transport.send(&request).await;
            self.record(outcome, &mut report);

            match self.settings.pause_policy {
                PausePolicy::BetweenSends => pause_pending = true,
                PausePolicy::AfterEverySend => {
                    if !self.pause(cancel, state, &mut report).await {
                        report.cancelled = true;
                        break;
                    }
                }
            }
        }

        report.finish();
        info!(
            "Batch {} finished: {} sent, {} failed, {} skipped{}",
            report.batch_id,
            report.sent.len(),
            report.failures.len(),
            report.skipped.len(),
            if report.cancelled { " (cancelled)" } else { "" }
        );

        Ok(report)
    }

    /// 添付ファイルを選択してエントリを作る。対象がなければスキップとして記録する
    async fn build_entry(
        &self,
        directory: &Path,
        filter: &AttachmentFilter,
        report: &mut BatchReport,
    ) -> Option<RecipientEntry> {
        let address = recipient_address_of(directory)?;

        let attachments = match self
            .recipient_repository
            .select_attachments(directory, filter)
            .await
        {
            Ok(attachments) => attachments,
            Err(e) => {
                warn!("Failed to read {}: {:#}", directory.display(), e);
                Vec::new()
            }
        };

        match RecipientEntry::from_directory(directory, attachments) {
            Some(entry) => Some(entry),
            None => {
                warn!("Skipping {}: no matching attachments", address);
                report.skipped.push(address);
                None
            }
        }
    }

    fn record(&self, outcome: SendOutcome, report: &mut BatchReport) {
        let recipient = outcome.recipient.clone();
        match outcome.into_error() {
            None => {
                info!("Sent to {}", recipient);
                report.sent.push(recipient);
            }
            Some(err) => {
                if let DispatchError::Transport {
                    recipient,
                    diagnostic,
                } = &err
                {
                    self.reporter.report(recipient, diagnostic);
                }
                report.failures.push(err);
            }
        }
    }

    /// 待機する。キャンセルされた場合は `false`
    async fn pause(
        &self,
        cancel: &CancelToken,
        state: &watch::Sender<DispatchState>,
        report: &mut BatchReport,
    ) -> bool {
        if cancel.is_cancelled() {
            return false;
        }

        transition(state, DispatchState::Pausing);
        debug!("Pausing {:?} before the next recipient", self.settings.pause);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Batch cancelled while pausing");
                false
            }
            _ = self.pacer.pause(self.settings.pause) => {
                report.pauses += 1;
                true
            }
        }
    }
}

fn transition(state: &watch::Sender<DispatchState>, next: DispatchState) {
    let previous = state.send_replace(next);
    if previous != next {
        debug!("Dispatch state: {} -> {}", previous, next);
    }
}
