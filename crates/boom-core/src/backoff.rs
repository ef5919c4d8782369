//! Retry with exponential backoff for outbound calls

use crate::error::{BoomError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Which failures earn another attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryTrigger {
    /// Network errors, 429 and 5xx. Other 4xx fail fast.
    #[default]
    Transient,
    /// Every error is retried until the budget runs out
    Any,
}

impl RetryTrigger {
    pub fn should_retry(&self, error: &BoomError) -> bool {
        match self {
            RetryTrigger::Transient => error.is_transient(),
            RetryTrigger::Any => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// Retries after the first attempt; total attempts is `max_retries + 1`
    pub max_retries: u32,
    pub base_delay: Duration,
    pub trigger: RetryTrigger,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            trigger: RetryTrigger::Transient,
        }
    }
}

impl BackoffPolicy {
    /// Delay before retry `retry` (0-indexed): `base_delay * 2^retry`
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(retry))
    }

    /// Sum of every delay when the whole budget is spent
    pub fn total_delay(&self) -> Duration {
        (0..self.max_retries)
            .map(|retry| self.delay_for_retry(retry))
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(d))
    }
}

/// Run `operation` until it succeeds, a permanent error occurs, or the retry
/// budget is spent. The last error is returned unchanged.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &BackoffPolicy,
    label: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retry = 0;
    loop {
        match operation().await {
            Ok(value) => {
                if retry > 0 {
                    log::info!("{} succeeded after {} retries", label, retry);
                }
                return Ok(value);
            }
            Err(e) if retry < policy.max_retries && policy.trigger.should_retry(&e) => {
                let delay = policy.delay_for_retry(retry);
                log::warn!(
                    "{} failed (attempt {}/{}): {}; retrying in {:?}",
                    label,
                    retry + 1,
                    policy.max_retries + 1,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                retry += 1;
            }
            Err(e) => {
                log::error!("{} failed after {} attempts: {}", label, retry + 1, e);
                return Err(e);
            }
        }
    }
}
