//! # Batch Control
//!
//! 実行中のバッチに対するキャンセルと完了通知

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::dto::batch_report::BatchReport;
use crate::domain::entities::dispatch_state::DispatchState;
use crate::domain::error::DispatchError;

/// キャンセルを要求する側
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// キャンセルを要求する。送信中の1件は中断しない
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// キャンセルを監視する側
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// キャンセルされるまで待つ
    ///
    /// ハンドルがキャンセルせずに破棄された場合は永遠に完了しない
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let changed = rx.wait_for(|cancelled| *cancelled).await.map(|_| ());
        if changed.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// キャンセル用のハンドルとトークンを作成
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx: Arc::new(tx) }, CancelToken { rx })
}

/// 起動済みバッチへのハンドル
///
/// `wait()` でバッチの完了（= 完了通知）を待つ
pub struct BatchHandle {
    join: JoinHandle<Result<BatchReport, DispatchError>>,
    cancel: CancelHandle,
    state: watch::Receiver<DispatchState>,
}

impl BatchHandle {
    pub(crate) fn new(
        join: JoinHandle<Result<BatchReport, DispatchError>>,
        cancel: CancelHandle,
        state: watch::Receiver<DispatchState>,
    ) -> Self {
        Self {
            join,
            cancel,
            state,
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// 現在の状態
    pub fn state(&self) -> DispatchState {
        *self.state.borrow()
    }

    /// 状態遷移を購読する
    pub fn subscribe(&self) -> watch::Receiver<DispatchState> {
        self.state.clone()
    }

    /// バッチの完了を待つ
    ///
    /// # Errors
    ///
    /// バッチ全体のエラー、またはタスクが異常終了した場合に `DispatchError::Task`
    pub async fn wait(self) -> Result<BatchReport, DispatchError> {
        self.join
            .await
            .map_err(|e| DispatchError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_is_visible_to_token() {
        let (handle, token) = cancellation();
        assert!(!token.is_cancelled());

        handle.cancel();

        assert!(token.is_cancelled());
        assert!(handle.is_cancelled());
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("cancelled() should resolve after cancel()");
    }

    #[tokio::test]
    async fn test_dropped_handle_never_cancels() {
        let (handle, token) = cancellation();
        drop(handle);

        let waited = tokio::time::timeout(Duration::from_millis(50), token.cancelled()).await;
        assert!(waited.is_err());
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn test_wait_maps_panics_to_task_error() {
        let (cancel, _token) = cancellation();
        let (_state_tx, state_rx) = watch::channel(DispatchState::Idle);
        let join: JoinHandle<Result<BatchReport, DispatchError>> =
            tokio::spawn(async { panic!("boom") });

        let handle = BatchHandle::new(join, cancel, state_rx);
        let result = handle.wait().await;

        assert!(matches!(result, Err(DispatchError::Task(_))));
    }
}
