//! Deadline-bounded polling.
//!
//! [`poll_until`] runs a probe on its own task, sleeping a fixed interval
//! between misses, while the caller races that task against the deadline and
//! an external [`CancellationToken`]. Either one stops the worker in the middle
//! of its sleep, so a wait never overruns its deadline by more than one poll
//! interval, and a probe that never returns cannot extend it at all.

use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Timeout applied when neither the context nor the config provides one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Delay between two probes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub timeout: Duration,
    pub interval: Duration,
}

impl PollOptions {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// A satisfied wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Number of probes evaluated, including the successful one.
    pub attempts: u32,
    pub waited: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollError {
    /// The deadline passed before the probe succeeded.
    Elapsed { waited: Duration },
    /// The caller's token was cancelled.
    Cancelled { waited: Duration },
}

/// Evaluate `probe` until it returns `true`, the timeout elapses, or `cancel`
/// fires.
///
/// The probe receives the 1-based attempt number. It runs on a spawned task,
/// so it must own what it touches.
pub async fn poll_until<F, Fut>(
    options: PollOptions,
    cancel: &CancellationToken,
    mut probe: F,
) -> Result<PollOutcome, PollError>
where
    F: FnMut(u32) -> Fut + Send + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    let started = Instant::now();
    // Too far out to represent: wait without a deadline.
    let deadline = started.checked_add(options.timeout);
    let token = cancel.child_token();
    let worker_token = token.clone();
    let interval = options.interval;

    let mut worker = tokio::spawn(async move {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            if probe(attempts).await {
                return Some(attempts);
            }
            tokio::select! {
                _ = worker_token.cancelled() => return None,
                _ = sleep(interval) => {}
            }
        }
    });

    let result = tokio::select! {
        biased;
        joined = &mut worker => match joined {
            Ok(Some(attempts)) => Ok(PollOutcome {
                attempts,
                waited: started.elapsed(),
            }),
            Ok(None) => Err(PollError::Cancelled {
                waited: started.elapsed(),
            }),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Err(PollError::Cancelled {
                waited: started.elapsed(),
            }),
        },
        _ = cancel.cancelled() => Err(PollError::Cancelled {
            waited: started.elapsed(),
        }),
        _ = expire(deadline) => Err(PollError::Elapsed {
            waited: started.elapsed(),
        }),
    };

    token.cancel();
    worker.abort();

    match &result {
        Ok(outcome) => debug!(attempts = outcome.attempts, waited = ?outcome.waited, "poll satisfied"),
        Err(err) => debug!(?err, "poll gave up"),
    }
    result
}

async fn expire(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Check a per-invocation timeout: zero and durations past what the clock
/// can represent are rejected.
pub(crate) fn check_timeout(timeout: Option<Duration>) -> crate::Result<Option<Duration>> {
    let reason = match timeout {
        Some(t) if t.is_zero() => "the timeout should be greater than zero".to_string(),
        Some(t) if Instant::now().checked_add(t).is_none() => format!("{:?} is too large", t),
        _ => return Ok(timeout),
    };
    Err(crate::Error::OutOfRange {
        name: "timeout",
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn options(timeout_ms: u64, interval_ms: u64) -> PollOptions {
        PollOptions::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(interval_ms),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_satisfied_probe_needs_no_sleep() {
        let token = CancellationToken::new();
        let outcome = poll_until(options(2000, 500), &token, |_| async { true })
            .await
            .unwrap();
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.waited, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_succeeds_after_some_attempts() {
        let token = CancellationToken::new();
        let outcome = poll_until(options(2000, 500), &token, |attempt| async move {
            attempt >= 3
        })
        .await
        .unwrap();
        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.waited, Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsatisfied_probe_fails_at_deadline() {
        let token = CancellationToken::new();
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let start = Instant::now();

        let err = poll_until(options(2000, 500), &token, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { false }
        })
        .await
        .unwrap_err();

        let elapsed = start.elapsed();
        assert!(matches!(err, PollError::Elapsed { .. }));
        assert!(elapsed >= Duration::from_millis(2000));
        assert!(elapsed <= Duration::from_millis(2500));
        assert!(calls.load(Ordering::SeqCst) >= 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_probe_still_times_out() {
        let token = CancellationToken::new();
        let start = Instant::now();
        let err = poll_until(options(1000, 100), &token, |_| std::future::pending::<bool>())
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Elapsed { .. }));
        assert_eq!(start.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrepresentable_timeout_waits_without_deadline() {
        let token = CancellationToken::new();
        let unbounded = options(0, 500).with_timeout(Duration::MAX);
        let outcome = poll_until(unbounded, &token, |attempt| async move { attempt >= 2 })
            .await
            .unwrap();
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.waited, Duration::from_millis(500));

        let trigger = token.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(700)).await;
            trigger.cancel();
        });
        let err = poll_until(unbounded, &token, |_| async { false })
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Cancelled { .. }));
    }

    #[test]
    fn test_check_timeout() {
        assert_eq!(check_timeout(None).unwrap(), None);
        assert_eq!(
            check_timeout(Some(Duration::from_millis(1))).unwrap(),
            Some(Duration::from_millis(1))
        );
        assert!(matches!(
            check_timeout(Some(Duration::ZERO)),
            Err(crate::Error::OutOfRange { name: "timeout", .. })
        ));
        assert!(matches!(
            check_timeout(Some(Duration::MAX)),
            Err(crate::Error::OutOfRange { name: "timeout", .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_cancel_interrupts_sleep() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(1200)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let err = poll_until(options(20_000, 5000), &token, |_| async { false })
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::Cancelled { .. }));
        // Cancelled mid-sleep, well before the 5s interval would end.
        assert_eq!(start.elapsed(), Duration::from_millis(1200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_token() {
        let token = CancellationToken::new();
        token.cancel();
        let err = poll_until(options(2000, 500), &token, |_| async { false })
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Cancelled { .. }));
    }
}
