//! Bounded retry with linear backoff.
//!
//! The loop is strictly sequential: one attempt in flight, the delay honoured
//! before the next, no cancellation once started. Delays go through [`Delay`]
//! so tests can record them instead of sleeping.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::ModelError;
use crate::constants::{MAX_RETRIES, RETRY_BASE_DELAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Wait before attempt `n + 1` is `base_delay * n`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            base_delay: RETRY_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// How a failed attempt is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transient,
    Fatal,
}

/// 429 or an "overloaded" message is transient; every other failure is fatal.
pub fn classify(status: u16, message: &str) -> FailureKind {
    if status == 429 || message.contains("overloaded") {
        FailureKind::Transient
    } else {
        FailureKind::Fatal
    }
}

#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Real sleeping on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { after: Duration },
    GiveUp(ModelError),
}

/// Attempt counter plus the most recent failure.
#[derive(Debug, Default)]
pub struct RetryState {
    attempt: u32,
    last_error: Option<ModelError>,
}

impl RetryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of the attempt currently running (1-based), 0 before the first.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn last_error(&self) -> Option<&ModelError> {
        self.last_error.as_ref()
    }

    pub fn begin_attempt(&mut self) -> u32 {
        self.attempt += 1;
        self.attempt
    }

    pub fn on_failure(&mut self, policy: &RetryPolicy, error: ModelError) -> RetryDecision {
        if error.is_transient() && self.attempt < policy.max_attempts() {
            let after = policy.backoff_for(self.attempt);
            self.last_error = Some(error);
            RetryDecision::Retry { after }
        } else {
            self.last_error = None;
            RetryDecision::GiveUp(error)
        }
    }
}

/// Run `operation` until it succeeds, fails fatally, or attempts run out.
///
/// The closure receives the 1-based attempt number. On success the number of
/// attempts used is returned alongside the value.
pub async fn run_with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    delay: &dyn Delay,
    mut operation: F,
) -> Result<(T, u32), ModelError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ModelError>>,
{
    let mut state = RetryState::new();
    loop {
        let attempt = state.begin_attempt();
        match operation(attempt).await {
            Ok(value) => return Ok((value, attempt)),
            Err(err) => match state.on_failure(policy, err) {
                RetryDecision::Retry { after } => {
                    warn!(
                        attempt,
                        max_attempts = policy.max_attempts(),
                        delay_ms = after.as_millis() as u64,
                        error = ?state.last_error().map(ToString::to_string),
                        "Transient failure, retrying"
                    );
                    delay.wait(after).await;
                }
                RetryDecision::GiveUp(err) => {
                    debug!(attempt, transient = err.is_transient(), "Giving up");
                    return Err(err);
                }
            },
        }
    }
}
