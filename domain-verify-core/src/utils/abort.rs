//! Cooperative cancellation for long-running workflows

use std::time::Duration;

use tokio::sync::watch;

use crate::error::{CoreError, CoreResult};

/// Create a connected abort handle and signal.
pub fn abort_pair() -> (AbortHandle, AbortSignal) {
    let (tx, rx) = watch::channel(false);
    (AbortHandle { tx }, AbortSignal { rx: Some(rx) })
}

/// Requests cancellation of every [`AbortSignal`] cloned from its pair.
#[derive(Debug)]
pub struct AbortHandle {
    tx: watch::Sender<bool>,
}

impl AbortHandle {
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }
}

/// Observed by a workflow between steps and while waiting.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: Option<watch::Receiver<bool>>,
}

impl AbortSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self { rx: None }
    }

    pub fn is_aborted(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Fail with [`CoreError::Cancelled`] if an abort was requested.
    pub fn check(&self) -> CoreResult<()> {
        if self.is_aborted() {
            Err(CoreError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Sleep for `duration`, returning early with [`CoreError::Cancelled`] on abort.
    pub async fn sleep(&self, duration: Duration) -> CoreResult<()> {
        self.check()?;

        let Some(rx) = &self.rx else {
            tokio::time::sleep(duration).await;
            return Ok(());
        };

        let mut rx = rx.clone();
        tokio::select! {
            () = tokio::time::sleep(duration) => Ok(()),
            () = wait_for_abort(&mut rx) => Err(CoreError::Cancelled),
        }
    }
}

impl Default for AbortSignal {
    fn default() -> Self {
        Self::never()
    }
}

/// Resolves once the flag is set; pends forever if the handle is dropped first.
async fn wait_for_abort(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|aborted| *aborted).await.is_err() {
        std::future::pending::<()>().await;
    }
}
