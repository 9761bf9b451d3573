//! Failure notification side channel

use crate::error::Error;
use tracing::warn;

/// Receives every verification failure
///
/// Called once per failed verification, after the result is decided. It
/// cannot change the outcome and must not block: hand slow work (audit
/// storage, remote telemetry) off to another task.
pub trait FailureObserver: Send + Sync {
    fn on_failure(&self, error: &Error);
}

impl<F> FailureObserver for F
where
    F: Fn(&Error) + Send + Sync,
{
    fn on_failure(&self, error: &Error) {
        self(error)
    }
}

/// Logs failures as `tracing` warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FailureObserver for TracingObserver {
    fn on_failure(&self, error: &Error) {
        warn!(kind = error.kind(), error = %error, "ID token verification failed");
    }
}
