//! Backoff for idempotent platform reads

use std::time::Duration;

use crate::error::ProviderError;

/// Delay schedule between transport retries.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Backoff {
    pub base: Duration,
    pub max: Duration,
    /// Upper bound on a server-provided `Retry-After`.
    pub max_retry_after: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(100),
            max: Duration::from_secs(10),
            max_retry_after: Duration::from_secs(30),
        }
    }
}

impl Backoff {
    /// Wait before retry number `retry` (0-based) after `error`.
    pub fn delay(&self, error: &ProviderError, retry: u32) -> Duration {
        if let ProviderError::RateLimited {
            retry_after: Some(secs),
            ..
        } = error
        {
            return Duration::from_secs(*secs).min(self.max_retry_after);
        }
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.max)
    }
}
