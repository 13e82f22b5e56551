//! Retry-polling resolver for widgets that need re-triggering.
//!
//! Distinct from the readiness waiter: the waiter only observes, while this
//! loop re-executes an action between checks. The one consumer in this suite
//! is the location filter dropdown, whose option list sometimes fails to
//! populate on the first open.

use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::errors::CheckError;

/// Bounded retry schedule. Invariant: at least one attempt, non-zero pause.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    interval: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Result<Self> {
        if max_attempts == 0 {
            anyhow::bail!("Retry policy requires at least one attempt");
        }
        if interval.is_zero() {
            anyhow::bail!("Retry interval must be greater than zero");
        }
        Ok(RetryPolicy {
            max_attempts,
            interval,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Execute `action`, pause, then probe the observable count; repeat until the
/// count exceeds `threshold` or the attempts are spent.
///
/// Success is a minimum useful state (`count > threshold`), not an exact
/// count: a fresh page load does not tell us the true total, only that more
/// than the placeholder has arrived. The threshold is a parameter so callers
/// can tighten the definition of "populated".
///
/// Performs at most `policy.max_attempts()` action invocations and halts on
/// the first satisfied probe. Probing an already-satisfied state again would
/// succeed again; the check is read-only.
pub async fn resolve_populated<A, FA, P, FP>(
    policy: &RetryPolicy,
    threshold: usize,
    mut action: A,
    mut probe: P,
) -> Result<usize, CheckError>
where
    A: FnMut() -> FA,
    FA: Future<Output = Result<()>>,
    P: FnMut() -> FP,
    FP: Future<Output = Result<usize>>,
{
    let mut last_count = 0;

    for attempt in 1..=policy.max_attempts() {
        action().await.map_err(CheckError::Driver)?;
        tokio::time::sleep(policy.interval()).await;

        last_count = probe().await.map_err(CheckError::Driver)?;
        debug!(
            "Attempt {}/{}: observed count {}",
            attempt,
            policy.max_attempts(),
            last_count
        );

        if last_count > threshold {
            return Ok(last_count);
        }
    }

    Err(CheckError::RetryExhausted {
        attempts: policy.max_attempts(),
        last_count,
    })
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;
