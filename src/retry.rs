//! Bounded retry with linear backoff.
//!
//! ```text
//!  attempt 1 ──✗──▶ wait initial ──▶ attempt 2 ──✗──▶ wait initial+escalation ──▶ …
//!                                                      ──▶ attempt N ──✗──▶ RetryExhausted
//! ```
//!
//! Only [`FetchError::Transient`] failures are retried; a permanent failure
//! is returned after the attempt that produced it.  The fetcher never
//! terminates the process: what to do with [`RetryExhausted`] is the caller's
//! policy.

use core::time::Duration;

use log::debug;

use crate::app::events::AppEvent;
use crate::app::ports::{Clock, EventSink};
use crate::error::{FetchError, FetchFailure, RetryExhausted};

/// Attempt cap and delay schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.  Never below 1.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub escalation: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration, escalation: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            escalation,
        }
    }

    /// Delay after `failures_so_far` failed attempts (1-based):
    /// 1 → `initial`, 2 → `initial + escalation`, …
    pub fn delay_after(&self, failures_so_far: u32) -> Duration {
        self.initial_delay + self.escalation * failures_so_far.saturating_sub(1)
    }

}

/// Wraps a fallible operation with [`RetryPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct ResilientFetcher {
    policy: RetryPolicy,
}

impl ResilientFetcher {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds, fails permanently or the attempt cap
    /// is reached.  Every failed attempt is reported to `sink`; waits go
    /// through `clock` so tests can observe them without sleeping.
    pub fn fetch<T>(
        &self,
        label: &'static str,
        clock: &mut impl Clock,
        sink: &mut impl EventSink,
        mut operation: impl FnMut() -> Result<T, FetchError>,
    ) -> Result<T, FetchFailure> {
        let max = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let error = match operation() {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("{label}: succeeded on attempt {attempt}/{max}");
                    }
                    return Ok(value);
                }
                Err(FetchError::Permanent(e)) => {
                    sink.emit(&AppEvent::PermanentFailure { operation: label, error: e });
                    return Err(FetchFailure::Permanent(e));
                }
                Err(FetchError::Transient(e)) => e,
            };

            let remaining = max.saturating_sub(attempt);
            let retry_in = (remaining > 0).then(|| self.policy.delay_after(attempt));
            sink.emit(&AppEvent::AttemptFailed {
                operation: label,
                attempt,
                max_attempts: max,
                remaining,
                retry_in,
                error,
            });

            match retry_in {
                Some(delay) => clock.sleep(delay),
                None => {
                    let exhausted = RetryExhausted {
                        attempts: attempt,
                        last: error,
                    };
                    sink.emit(&AppEvent::RetryExhausted {
                        operation: label,
                        error: exhausted,
                    });
                    return Err(FetchFailure::Exhausted(exhausted));
                }
            }
        }
    }
}
