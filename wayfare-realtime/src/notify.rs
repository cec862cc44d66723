//! Spoken progress updates for slow operations.
//!
//! [`SlowOperationNotifier`] races an operation against a timer. When the timer
//! wins, a notification (usually a short "still searching" reply) runs
//! alongside the operation. When the operation wins, the notification is never
//! started.
//!
//! # Timing
//!
//! Everything runs on the caller's task; the operation and the notification are
//! polled cooperatively, never spawned. That gives two guarantees:
//!
//! - If the operation completes before `notify_after` elapses, `on_slow` is not
//!   called at all.
//! - If the notification was started, it runs to completion before
//!   [`run`](SlowOperationNotifier::run) returns, so it can never fire after
//!   the result has been handed back.
//!
//! Cancellation is cooperative: a notification that has already started is
//! allowed to finish even if the operation completes in the meantime. When the
//! operation and the timer become ready at the same instant, the notification
//! may or may not fire. The operation is polled first in that case, but callers
//! must not rely on it.

use std::future::Future;
use std::time::Duration;
use tracing::{Instrument, debug, trace, warn};
use wayfare_core::Result;
use wayfare_telemetry::status_update_span;

/// Races an operation against a delayed notification.
#[derive(Debug, Clone)]
pub struct SlowOperationNotifier {
    notify_after: Duration,
    label: String,
}

enum First<T> {
    Operation(T),
    Notified(Result<()>),
}

impl SlowOperationNotifier {
    /// Notify once `notify_after` has elapsed without a result.
    pub fn new(notify_after: Duration) -> Self {
        Self { notify_after, label: "operation".to_string() }
    }

    /// Name the operation in logs and spans.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Delay before the notification fires.
    pub fn notify_after(&self) -> Duration {
        self.notify_after
    }

    /// Run `operation`, calling `on_slow` at most once if it takes longer than
    /// the configured delay.
    ///
    /// Returns exactly what `operation` returns. A failing `on_slow` is logged
    /// and otherwise ignored.
    pub async fn run<T, Op, Slow, SlowFut>(&self, operation: Op, on_slow: Slow) -> T
    where
        Op: Future<Output = T>,
        Slow: FnOnce() -> SlowFut,
        SlowFut: Future<Output = Result<()>>,
    {
        tokio::pin!(operation);
        let timer = tokio::time::sleep(self.notify_after);
        tokio::pin!(timer);

        let early = tokio::select! {
            biased;
            output = &mut operation => Some(output),
            () = &mut timer => None,
        };
        if let Some(output) = early {
            trace!(operation = %self.label, "finished before status timer; notification cancelled");
            return output;
        }

        debug!(
            operation = %self.label,
            after_ms = self.notify_after.as_millis() as u64,
            "operation is slow; sending status update"
        );
        let notification = on_slow().instrument(status_update_span(&self.label));
        tokio::pin!(notification);

        let first = tokio::select! {
            biased;
            output = &mut operation => First::Operation(output),
            result = &mut notification => First::Notified(result),
        };

        match first {
            First::Operation(output) => {
                // Already speaking; let the update finish instead of cutting it off.
                self.log_notification(notification.await);
                output
            }
            First::Notified(result) => {
                self.log_notification(result);
                operation.await
            }
        }
    }

    fn log_notification(&self, result: Result<()>) {
        if let Err(e) = result {
            warn!(operation = %self.label, error = %e, "status update failed");
        }
    }
}
