//! Bounded retry for rate-limited API calls.
//!
//! Only HTTP 429 responses are retried; every other error is returned on the
//! first attempt. Delays grow exponentially from `initial_delay_ms` up to
//! `max_delay_ms`.

use backon::{ExponentialBuilder, Retryable};
use pokedex_common::{PokedexError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts including the first request
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    8000
}

impl RetryConfig {
    /// Run `func` until it succeeds, fails with a non-retryable error, or the
    /// attempts run out. Exhausted rate limiting becomes
    /// [`PokedexError::RateLimited`].
    pub async fn retry<R, F, Fut>(&self, what: &str, func: F) -> Result<R>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let attempts = self.attempts();
        func.retry(self.backoff())
            .when(PokedexError::is_retryable)
            .notify(|err, delay| {
                log::warn!("{what}: {err}, retrying in {delay:?}");
            })
            .await
            .map_err(|err| {
                if err.is_retryable() {
                    PokedexError::RateLimited { attempts }
                } else {
                    err
                }
            })
    }

    fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(self.initial_delay_ms))
            .with_max_delay(Duration::from_millis(self.max_delay_ms.max(self.initial_delay_ms)))
            .with_factor(2.0)
            .with_max_times(self.attempts() - 1)
    }
}
