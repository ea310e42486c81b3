//! Retry with exponential backoff for transient store and catalog failures

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum retry delay in milliseconds
    pub max_delay_ms: u64,

    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 3, initial_delay_ms: 500, max_delay_ms: 5_000, backoff_multiplier: 2.0 }
    }
}

/// Run `f` until it succeeds, fails permanently, or runs out of attempts
///
/// Only errors for which `is_transient` returns true are retried.
pub async fn run_with_retry<F, Fut, T, E>(
    mut f: F,
    config: &RetryConfig,
    is_transient: impl Fn(&E) -> bool,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    let attempts = config.max_retries.max(1);
    let mut delay = Duration::from_millis(config.initial_delay_ms);
    let mut attempt = 1;

    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < attempts && is_transient(&e) => {
                warn!("Attempt {} failed: {}, retrying in {:?}", attempt, e, delay);
                sleep(delay).await;

                // Exponential backoff
                delay = Duration::from_millis(
                    (delay.as_millis() as f64 * config.backoff_multiplier)
                        .min(config.max_delay_ms as f64) as u64,
                );
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
