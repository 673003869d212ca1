//! Bounded retry loop with credential/model rotation.
//!
//! The engine drives up to `budget` attempts of an async call, where the
//! call itself draws the next credential (and model, where applicable)
//! from the owning service's pools. Transient provider failures consume
//! one unit of budget and continue; fatal failures propagate at once
//! without rotation. The engine never sleeps between attempts: rotation
//! to a different credential *is* the backoff strategy here.

use crate::provider::ProviderError;
use crate::{Error, Result};
use std::future::Future;

/// Retry policy shared by both services.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempt budget per pool entry. The reference policy is 2: one
    /// full rotation of the largest pool, twice over.
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { multiplier: 2 }
    }
}

impl RetryPolicy {
    /// Attempt budget over the pools an invocation rotates through:
    /// `max(sizes) * multiplier`. Cursors advance independently per
    /// attempt, so with unequal pool sizes some (credential, model)
    /// pairs may never be tried within the budget. That matches the
    /// reference rotation and is intentional.
    pub fn budget<I>(&self, pool_sizes: I) -> u32
    where
        I: IntoIterator<Item = usize>,
    {
        let largest = pool_sizes.into_iter().max().unwrap_or(0);
        (largest as u32).saturating_mul(self.multiplier)
    }
}

/// Outcome classification for one failed attempt.
#[derive(Debug)]
pub enum AttemptError {
    /// Transient provider failure: log, rotate, try again.
    Retry(ProviderError),
    /// Anything else: propagate immediately, no further attempts.
    Fatal(Error),
}

impl From<ProviderError> for AttemptError {
    fn from(err: ProviderError) -> Self {
        AttemptError::Retry(err)
    }
}

/// Run `call` up to `budget` times. `call` receives the 1-based attempt
/// index for diagnostics; it is responsible for drawing fresh pool
/// entries on every invocation.
pub async fn invoke<T, F, Fut>(op: &'static str, budget: u32, mut call: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<T, AttemptError>>,
{
    let mut last: Option<ProviderError> = None;

    for attempt in 1..=budget {
        tracing::debug!(op, attempt, budget, "provider attempt");
        match call(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(op, attempt, "succeeded after rotation");
                }
                return Ok(value);
            }
            Err(AttemptError::Retry(err)) => {
                tracing::warn!(op, attempt, budget, error = %err, "retryable provider failure; rotating");
                last = Some(err);
            }
            Err(AttemptError::Fatal(err)) => {
                tracing::error!(op, attempt, error = %err, "fatal failure; aborting invocation");
                return Err(err);
            }
        }
    }

    Err(Error::ExhaustedRetries {
        attempts: budget,
        last: last
            .unwrap_or_else(|| ProviderError::Connection("attempt budget was zero".to_string())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn budget_is_largest_pool_times_multiplier() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.budget([3]), 6);
        assert_eq!(policy.budget([2, 3]), 6);
        assert_eq!(policy.budget([2, 2]), 4);
    }

    #[tokio::test]
    async fn returns_after_exactly_k_calls_on_late_success() {
        let calls = AtomicU32::new(0);
        let result = invoke("test", 6, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 4 {
                    Err(AttemptError::Retry(ProviderError::RateLimited(
                        "busy".into(),
                    )))
                } else {
                    Ok("done")
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, "done");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn exhausts_budget_and_carries_last_error() {
        let calls = AtomicU32::new(0);
        let err = invoke::<(), _, _>("test", 4, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Err(AttemptError::Retry(ProviderError::Status {
                    status: 500 + attempt as u16,
                    message: "flaky".into(),
                }))
            }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        match err {
            Error::ExhaustedRetries { attempts, last } => {
                assert_eq!(attempts, 4);
                assert!(matches!(last, ProviderError::Status { status: 504, .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fatal_error_aborts_without_consuming_budget() {
        let calls = AtomicU32::new(0);
        let err = invoke::<(), _, _>("test", 8, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::Fatal(Error::validation("bad payload"))) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn success_on_first_attempt_makes_one_call() {
        let calls = AtomicU32::new(0);
        let result = invoke("test", 4, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(42u32) }
        })
        .await
        .unwrap();

        assert_eq!(result, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
