//! Error taxonomy for the acquisition engine.
//!
//! ```text
//!  SensorClient ──▶ FetchError ──▶ ResilientFetcher ──▶ FetchFailure ──▶ ReadingProcessor ──▶ ConnectionError
//!                  (Transient |                        (Exhausted |                          (endpoint + failure)
//!                   Permanent)                          Permanent)
//! ```
//!
//! All variants are `Copy` so they can be carried inside observer events and
//! cycle outcomes without allocation.

use core::fmt;

use crate::reading::Endpoint;

// ---------------------------------------------------------------------------
// Transport-level errors
// ---------------------------------------------------------------------------

/// Network or connection failure.  Retried by the resilient fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientError {
    /// The connection could not be established or was dropped.
    ConnectionFailed,
    /// The request did not complete in time.
    Timeout,
    /// The sensor answered with a non-success HTTP status.
    BadStatus(u16),
}

impl fmt::Display for TransientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed => write!(f, "connection failed"),
            Self::Timeout => write!(f, "request timed out"),
            Self::BadStatus(code) => write!(f, "HTTP status {code}"),
        }
    }
}

/// Payload-shape failure.  Never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermanentError {
    /// The body was not valid JSON (or not a JSON object).
    MalformedPayload,
    /// A required channel field was absent or `null`.
    MissingField(&'static str),
    /// A channel value could not be mapped onto the AQI scale (non-finite).
    OutOfRange,
}

impl fmt::Display for PermanentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPayload => write!(f, "malformed payload"),
            Self::MissingField(name) => write!(f, "missing field '{name}'"),
            Self::OutOfRange => write!(f, "value outside the AQI scale"),
        }
    }
}

/// What a [`SensorClient`](crate::app::ports::SensorClient) call can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    Transient(TransientError),
    Permanent(PermanentError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient(e) => write!(f, "transient: {e}"),
            Self::Permanent(e) => write!(f, "permanent: {e}"),
        }
    }
}

impl From<TransientError> for FetchError {
    fn from(e: TransientError) -> Self {
        Self::Transient(e)
    }
}

impl From<PermanentError> for FetchError {
    fn from(e: PermanentError) -> Self {
        Self::Permanent(e)
    }
}

// ---------------------------------------------------------------------------
// Retry outcome
// ---------------------------------------------------------------------------

/// Every attempt failed transiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryExhausted {
    pub attempts: u32,
    pub last: TransientError,
}

impl fmt::Display for RetryExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gave up after {} attempts (last: {})", self.attempts, self.last)
    }
}

/// Terminal result of [`ResilientFetcher::fetch`](crate::retry::ResilientFetcher::fetch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    Exhausted(RetryExhausted),
    Permanent(PermanentError),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted(e) => e.fmt(f),
            Self::Permanent(e) => e.fmt(f),
        }
    }
}

impl From<RetryExhausted> for FetchFailure {
    fn from(e: RetryExhausted) -> Self {
        Self::Exhausted(e)
    }
}

impl From<PermanentError> for FetchFailure {
    fn from(e: PermanentError) -> Self {
        Self::Permanent(e)
    }
}

// ---------------------------------------------------------------------------
// Cycle-level error
// ---------------------------------------------------------------------------

/// A processing cycle produced no reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionError {
    pub endpoint: Endpoint,
    pub failure: FetchFailure,
}

impl ConnectionError {
    pub fn new(endpoint: Endpoint, failure: impl Into<FetchFailure>) -> Self {
        Self {
            endpoint,
            failure: failure.into(),
        }
    }

    /// `true` when the fetcher ran out of attempts.
    pub fn is_retry_exhausted(&self) -> bool {
        matches!(self.failure, FetchFailure::Exhausted(_))
    }

    /// `true` when the payload was unusable rather than unreachable.
    pub fn is_data_shape(&self) -> bool {
        matches!(self.failure, FetchFailure::Permanent(_))
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_data_shape() { "data-shape" } else { "network" };
        write!(f, "{} endpoint {} error: {}", self.endpoint, kind, self.failure)
    }
}

impl std::error::Error for ConnectionError {}

// ---------------------------------------------------------------------------
// AQI conversion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiError {
    /// No breakpoint covers the (clamped, truncated) concentration.
    OutOfRange,
}

impl fmt::Display for AqiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => write!(f, "concentration matches no breakpoint"),
        }
    }
}

impl From<AqiError> for PermanentError {
    fn from(e: AqiError) -> Self {
        match e {
            AqiError::OutOfRange => Self::OutOfRange,
        }
    }
}
