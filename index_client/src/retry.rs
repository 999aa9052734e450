//! Retrying a batch request after a transient failure.
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::error::ClientError;

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Pause before each retry.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    /// One retry after half a second.
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error, or
    /// the attempts are used up. Returns the last error in the latter cases.
    pub fn execute<T, F>(&self, operation_name: &str, mut operation: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Result<T, ClientError>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            debug!("Attempt {attempt}/{max_attempts} for {operation_name}");
            match operation() {
                Ok(value) => return Ok(value),
                Err(e) if attempt < max_attempts && e.is_retryable() => {
                    warn!(
                        "{operation_name} failed (attempt {attempt}/{max_attempts}): {e}. Retrying in {:?}",
                        self.backoff
                    );
                    thread::sleep(self.backoff);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
