//! Poll cadence and the quiet-hours window.
//!
//! ```text
//!   ──poll──┬──────── interval ────────┬──poll──┬──── …
//!           │ fast ticks: input, spinner, render │
//! ```
//!
//! Both types are plain values; the poll loop feeds them the monotonic time
//! and the local hour and acts on the answers.

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Local-time window during which polling is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    /// First quiet hour (0-23).  E.g. 23 = 11 PM.
    pub start_hour: u8,
    /// First hour polling resumes (0-23).  E.g. 6 = 6 AM.
    pub end_hour: u8,
}

impl QuietHours {
    pub fn is_quiet(&self, hour: u8) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            // Wraps around midnight.
            hour >= self.start_hour || hour < self.end_hour
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start_hour < 24 && self.end_hour < 24
    }
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            start_hour: 23,
            end_hour: 6,
        }
    }
}

/// Decides when the next outer poll is due.
#[derive(Debug, Clone, Copy)]
pub struct PollSchedule {
    interval_ms: u64,
    next_due_ms: Option<u64>,
}

impl PollSchedule {
    /// The first poll is due immediately.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: interval.as_millis() as u64,
            next_due_ms: None,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.next_due_ms.is_none_or(|due| now_ms >= due)
    }

    /// A poll slot was used at `now_ms` (started or skipped).
    pub fn mark_polled(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms.saturating_add(self.interval_ms));
    }

    pub fn has_polled(&self) -> bool {
        self.next_due_ms.is_some()
    }
}
