//! Session state machine: `{ON, OFF} × {ACTIVE, PAUSED}` plus spinner.
//!
//! ```text
//!   state        │ mode toggle  │ pause toggle
//!  ──────────────┼──────────────┼─────────────
//!   ON  · ACTIVE │ OFF · PAUSED │ ON  · PAUSED
//!   ON  · PAUSED │ OFF · PAUSED │ ON  · ACTIVE
//!   OFF · PAUSED │ ON  · ACTIVE │ OFF · ACTIVE
//!   OFF · ACTIVE │ ON  · ACTIVE │ OFF · PAUSED
//! ```
//!
//! Owned by the poll loop and mutated only in response to input commands
//! and the quiet-hours window.

/// Glyphs cycled in the bottom-right corner while polling is active.
pub const SPINNER_GLYPHS: [char; 4] = ['-', '/', '|', '\\'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub display_on: bool,
    pub active: bool,
    spinner_phase: u8,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            display_on: true,
            active: true,
            spinner_phase: 0,
        }
    }
}

impl SessionState {
    pub fn new(display_on: bool, active: bool) -> Self {
        Self {
            display_on,
            active,
            spinner_phase: 0,
        }
    }

    /// Pin the spinner to a phase (taken modulo 4).
    pub fn with_spinner_phase(mut self, phase: u8) -> Self {
        self.spinner_phase = phase % SPINNER_GLYPHS.len() as u8;
        self
    }

    /// Display on → off and paused; display off → on and active.
    pub fn toggle_mode(&mut self) {
        if self.display_on {
            self.display_on = false;
            self.active = false;
        } else {
            self.display_on = true;
            self.active = true;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.active = !self.active;
    }

    /// One fast tick.  The spinner only turns while active.
    pub fn advance_spinner(&mut self) {
        if self.active {
            self.spinner_phase = (self.spinner_phase + 1) % SPINNER_GLYPHS.len() as u8;
        }
    }

    pub fn spinner_phase(&self) -> u8 {
        self.spinner_phase
    }

    /// Current glyph, or `None` while paused.
    pub fn spinner_glyph(&self) -> Option<char> {
        self.active
            .then(|| SPINNER_GLYPHS[usize::from(self.spinner_phase)])
    }
}
