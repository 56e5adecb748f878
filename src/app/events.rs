//! Outbound application events.
//!
//! The retry wrapper, the reading processor and the poll loop emit these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them; the stock one logs them.

use core::time::Duration;

use crate::error::{ConnectionError, PermanentError, RetryExhausted, TransientError};
use crate::reading::{Endpoint, Reading};

/// Structured events emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The poll loop has started.
    Started,

    /// One attempt of a wrapped operation failed transiently.
    AttemptFailed {
        operation: &'static str,
        /// 1-based attempt index.
        attempt: u32,
        max_attempts: u32,
        remaining: u32,
        /// Wait before the next attempt; `None` on the final attempt.
        retry_in: Option<Duration>,
        error: TransientError,
    },

    /// A wrapped operation ran out of attempts.
    RetryExhausted {
        operation: &'static str,
        error: RetryExhausted,
    },

    /// A wrapped operation failed in a way that is never retried.
    PermanentFailure {
        operation: &'static str,
        error: PermanentError,
    },

    /// The two channels of one endpoint disagree.
    LowConfidence { endpoint: Endpoint, a: f64, b: f64 },

    /// A processing cycle completed.
    ReadingUpdated(Reading),

    /// A processing cycle failed; the display switches to the error frame.
    ConnectionError(ConnectionError),

    /// A poll was due while the previous cycle was still retrying.
    CycleSkipped,

    /// Display or polling state changed.
    ModeChanged { display_on: bool, active: bool },

    /// Polling suppression window entered (`true`) or left (`false`).
    QuietHours(bool),

    /// The newest valid reading passed the configured maximum age.
    ReadingStale { age_secs: u64 },

    /// The loop is exiting.
    Stopped,
}
