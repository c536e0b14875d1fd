//! Bounded-attempt retry with graceful degradation.

use crate::remote::RemoteError;

/// Log target for retry diagnostics
const LOG_TARGET: &str = "retry";

/// Outcome of a bounded retry loop.
///
/// Carrying the exhaustion marker instead of a bare `Option` lets the caller
/// decide between degrading to a fallback value and propagating the failure.
#[derive(Debug)]
pub enum RetryOutcome<T> {
    /// An attempt succeeded; no further attempts were made.
    Ok(T),

    /// Every attempt failed with a transient error.
    Exhausted { attempts: u32, last: RemoteError },
}

impl<T> RetryOutcome<T> {
    /// Converts this outcome into an `Option`, returning `Some` only for `Ok`.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Exhausted { .. } => None,
        }
    }
}

/// Invoke `op` up to `max_attempts` times, returning the first success.
///
/// Attempts are sequential with no backoff delay: the single caller wants a
/// fast-fail value for user-facing labeling, not eventual consistency. Any
/// error is treated as retryable. On exhaustion, one diagnostic line with the
/// attempt count and the last failure goes to the error stream.
pub async fn with_retries<T, F, Fut>(mut op: F, max_attempts: u32) -> RetryOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RemoteError>>,
{
    let mut last = None;

    for attempt in 1..=max_attempts {
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    log::debug!(target: LOG_TARGET, "operation succeeded on attempt {attempt} of {max_attempts}");
                }
                return RetryOutcome::Ok(value);
            }
            Err(err) => last = Some(err),
        }
    }

    let last = last.unwrap_or_else(|| RemoteError::Api("no attempts were made".to_string()));
    log::error!(target: LOG_TARGET, "GitHub API operation failed after {max_attempts} attempts. Cause: {last}");

    RetryOutcome::Exhausted {
        attempts: max_attempts,
        last,
    }
}

#[cfg(test)]
mod tests {
    use super::{RetryOutcome, with_retries};
    use crate::remote::RemoteError;
    use core::cell::Cell;

    #[tokio::test]
    async fn first_success_short_circuits() {
        let calls = Cell::new(0u32);

        let outcome = with_retries(
            || {
                calls.set(calls.get() + 1);
                async { Ok::<_, RemoteError>("octocat") }
            },
            3,
        )
        .await;

        assert!(matches!(outcome, RetryOutcome::Ok("octocat")));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn succeeds_on_final_attempt() {
        let calls = Cell::new(0u32);

        let outcome = with_retries(
            || {
                calls.set(calls.get() + 1);
                let attempt = calls.get();
                async move {
                    if attempt < 3 {
                        Err(RemoteError::Api("connection reset".to_string()))
                    } else {
                        Ok("octocat")
                    }
                }
            },
            3,
        )
        .await;

        assert!(matches!(outcome, RetryOutcome::Ok("octocat")));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn exhaustion_reports_attempt_count_and_last_error() {
        let calls = Cell::new(0u32);

        let outcome = with_retries(
            || {
                calls.set(calls.get() + 1);
                let attempt = calls.get();
                async move { Err::<(), _>(RemoteError::Api(format!("failure {attempt}"))) }
            },
            3,
        )
        .await;

        assert_eq!(calls.get(), 3);
        match outcome {
            RetryOutcome::Exhausted { attempts, last } => {
                assert_eq!(attempts, 3);
                assert_eq!(last.to_string(), "GitHub API call failed: failure 3");
            }
            RetryOutcome::Ok(()) => panic!("expected exhaustion"),
        }
    }

    #[tokio::test]
    async fn ok_maps_outcome_to_option() {
        assert_eq!(RetryOutcome::Ok(7).ok(), Some(7));

        let exhausted: RetryOutcome<i32> = RetryOutcome::Exhausted {
            attempts: 2,
            last: RemoteError::Api("boom".to_string()),
        };
        assert_eq!(exhausted.ok(), None);
    }
}
