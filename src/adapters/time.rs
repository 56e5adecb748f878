//! Host time adapter.
//!
//! Monotonic milliseconds come from `std::time::Instant`; the hour of day
//! comes from the local wall clock through `chrono`.

use core::time::Duration;
use std::time::Instant;

use chrono::{Local, Timelike};

use crate::app::ports::Clock;

/// [`Clock`] backed by the operating system.  Clones share the same origin.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn local_hour(&self) -> Option<u8> {
        u8::try_from(Local::now().hour()).ok()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
