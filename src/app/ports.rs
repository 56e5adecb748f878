//! Port traits: the hexagonal boundary between the engine and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PollLoop / ReadingProcessor (domain)
//! ```
//!
//! Driven adapters (HTTP client, display, buttons, clock, log sink, config
//! file) implement these traits.  The core consumes them via generics, so
//! the domain never touches a socket, a terminal or the wall clock directly.

use core::time::Duration;

use crate::config::MonitorConfig;
use crate::display::DisplayFrame;
use crate::error::{ConnectionError, FetchError};
use crate::reading::{Endpoint, RawPayload, Reading};

use super::commands::AppCommand;
use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: network → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one call per endpoint, no retries of its own.
pub trait SensorClient {
    /// Long-window averaged reading.
    fn get_average(&mut self) -> Result<RawPayload, FetchError>;

    /// Instantaneous reading.
    fn get_live(&mut self) -> Result<RawPayload, FetchError>;

    fn get(&mut self, endpoint: Endpoint) -> Result<RawPayload, FetchError> {
        match endpoint {
            Endpoint::Average => self.get_average(),
            Endpoint::Live => self.get_live(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Display and input ports
// ───────────────────────────────────────────────────────────────

/// Write-side port for the 16×2 display.  Must not block indefinitely.
pub trait Renderer {
    fn show(&mut self, frame: &DisplayFrame);
}

/// Button source, polled once per fast tick.
pub trait InputSource {
    /// Next pending command, or `None` when nothing is queued.
    fn poll(&mut self) -> Option<AppCommand>;
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic time, wall-clock hour and sleeping.  Injected so retry and
/// cadence logic run in tests without real time passing.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin (monotonic).
    fn now_ms(&self) -> u64;

    /// Local hour-of-day (0–23), or `None` when wall-clock time is unavailable.
    fn local_hour(&self) -> Option<u8>;

    fn sleep(&mut self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Fetch-cycle driver
// ───────────────────────────────────────────────────────────────

/// Result of one processing cycle.
pub type CycleOutcome = Result<Reading, ConnectionError>;

/// Schedules processing cycles on behalf of the poll loop.
///
/// At most one cycle is ever in flight; completed outcomes are held in a
/// single slot where a newer outcome replaces an untaken older one.
pub trait CycleDriver {
    /// Start a cycle.  Returns `false` (and does nothing) if one is still running.
    fn start_cycle(&mut self) -> bool;

    /// Take the latest completed outcome, if any.
    fn take_outcome(&mut self) -> Option<CycleOutcome>;

    fn in_flight(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads and persists [`MonitorConfig`].
///
/// Implementations MUST validate before persisting; invalid values are
/// rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<MonitorConfig, ConfigError>;

    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No stored configuration.
    NotFound,
    /// Stored configuration failed to deserialise.
    Corrupted,
    /// A field failed range validation; the message names the field.
    ValidationFailed(&'static str),
    /// Underlying I/O failed.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
