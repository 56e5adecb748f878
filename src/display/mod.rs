//! Display session: which frame the screen should show right now.
//!
//! ```text
//!   no reading yet ─────────────▶ "Initializing"
//!   latest cycle failed ────────▶ Connection Error   (whatever the state)
//!   display OFF ────────────────▶ blank
//!   reading older than limit ───▶ stale frame
//!   otherwise ──────────────────▶ AQI line + category + spinner
//! ```

pub mod frame;
pub mod state;

use core::time::Duration;

pub use frame::{DisplayFrame, FrameKind, DISPLAY_WIDTH};
pub use state::SessionState;

use crate::app::ports::CycleOutcome;
use crate::reading::Reading;

pub const INITIALIZING_TEXT: &str = "Initializing";
pub const READY_TEXT: &str = "Ready";

/// Holds the newest and the prior valid reading and renders frames from them.
#[derive(Debug, Clone, Default)]
pub struct DisplaySession {
    current: Option<Reading>,
    previous: Option<Reading>,
    stale_after_ms: Option<u64>,
}

impl DisplaySession {
    pub fn new(stale_after: Option<Duration>) -> Self {
        Self {
            current: None,
            previous: None,
            stale_after_ms: stale_after.map(|d| d.as_millis() as u64),
        }
    }

    /// Supersede the current reading.  A valid current reading moves to
    /// `previous`; an invalid one is dropped, so `previous` is always the
    /// last good measurement before `current`.
    pub fn record(&mut self, reading: Reading) {
        if let Some(old) = self.current.take().filter(|r| r.valid) {
            self.previous = Some(old);
        }
        self.current = Some(reading);
    }

    /// Record a cycle outcome; failures become an invalid reading stamped `now_ms`.
    pub fn accept(&mut self, outcome: &CycleOutcome, now_ms: u64) {
        match outcome {
            Ok(reading) => self.record(*reading),
            Err(_) => self.record(Reading::failed(now_ms)),
        }
    }

    pub fn current(&self) -> Option<&Reading> {
        self.current.as_ref()
    }

    pub fn previous(&self) -> Option<&Reading> {
        self.previous.as_ref()
    }

    /// Newest valid reading, whether or not it is still current.
    pub fn last_valid(&self) -> Option<&Reading> {
        self.current
            .as_ref()
            .filter(|r| r.valid)
            .or(self.previous.as_ref())
    }

    /// Age of the current reading past the stale limit, in seconds.
    pub fn stale_age_secs(&self, now_ms: u64) -> Option<u64> {
        let limit = self.stale_after_ms?;
        let reading = self.current.as_ref().filter(|r| r.valid)?;
        let age = reading.age_ms(now_ms);
        (age > limit).then_some(age / 1000)
    }

    pub fn render(&self, state: &SessionState, now_ms: u64) -> DisplayFrame {
        let Some(reading) = self.current.as_ref() else {
            return DisplayFrame::message(INITIALIZING_TEXT, frame::STARTUP_COLOR);
        };
        if !reading.valid {
            return DisplayFrame::connection_error();
        }
        if !state.display_on {
            return DisplayFrame::blank();
        }
        let glyph = state.spinner_glyph();
        if self.stale_age_secs(now_ms).is_some() {
            DisplayFrame::stale(reading, glyph)
        } else {
            DisplayFrame::reading(reading, glyph)
        }
    }
}
