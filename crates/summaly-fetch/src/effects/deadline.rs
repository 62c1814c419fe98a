//! Two deadlines racing to cancel one retrieval.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use tracing::warn;

use crate::error::{Deadline, FetchError};

/// Timers and cancellation signal owned by a single retrieval.
///
/// Both timers fire the same token. Dropping the guard aborts whatever
/// timers are still armed and cancels the token, so every exit path
/// releases both.
#[derive(Debug)]
pub(crate) struct Deadlines {
    token: CancellationToken,
    fired: Arc<OnceLock<Deadline>>,
    response: Option<JoinHandle<()>>,
    operation: JoinHandle<()>,
}

impl Deadlines {
    /// Arm both timers. Must be called inside a Tokio runtime.
    pub(crate) fn arm(response: Duration, operation: Duration) -> Self {
        let token = CancellationToken::new();
        let fired = Arc::new(OnceLock::new());

        Self {
            response: Some(Self::timer(response, Deadline::Response, &token, &fired)),
            operation: Self::timer(operation, Deadline::Operation, &token, &fired),
            token,
            fired,
        }
    }

    fn timer(
        after: Duration,
        kind: Deadline,
        token: &CancellationToken,
        fired: &Arc<OnceLock<Deadline>>,
    ) -> JoinHandle<()> {
        let token = token.clone();
        let fired = Arc::clone(fired);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if fired.set(kind).is_ok() {
                warn!(deadline = %kind, ?after, "deadline reached, aborting");
            }
            token.cancel();
        })
    }

    /// Headers arrived: only the operation deadline keeps running.
    pub(crate) fn disarm_response(&mut self) {
        if let Some(timer) = self.response.take() {
            timer.abort();
        }
    }

    pub(crate) fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    #[cfg(test)]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel the retrieval without waiting for a deadline.
    pub(crate) fn abort(&self) {
        self.token.cancel();
    }

    /// The error to surface after cancellation.
    pub(crate) fn timeout_error(&self) -> FetchError {
        FetchError::Timeout(self.fired.get().copied().unwrap_or(Deadline::Operation))
    }
}

impl Drop for Deadlines {
    fn drop(&mut self) {
        self.disarm_response();
        self.operation.abort();
        self.token.cancel();
    }
}
