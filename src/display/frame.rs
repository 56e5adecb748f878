//! Fixed-width frame composition for the 16×2 character display.
//!
//! ```text
//!   ┌────────────────┐
//!   │AQI A 42   L 38*│   line 1: average + marker, pad, live + marker
//!   │Good           /│   line 2: category, pad, spinner glyph
//!   └────────────────┘
//! ```
//!
//! Every line is exactly [`DISPLAY_WIDTH`] characters.  Padding is clamped
//! at zero and over-long text is clipped, so no input can produce a short
//! or overflowing line.

use core::fmt::Write;

use heapless::String;

use crate::aqi::Rgb;
use crate::reading::Reading;

pub const DISPLAY_WIDTH: usize = 16;

/// One display line.  ASCII only, so bytes and columns coincide.
pub type Line = String<DISPLAY_WIDTH>;

pub const STARTUP_COLOR: Rgb = (0, 150, 0);
pub const ERROR_COLOR: Rgb = (100, 0, 0);
pub const BLANK_COLOR: Rgb = (0, 0, 0);
pub const STALE_COLOR: Rgb = (100, 60, 0);

pub const CONNECTION_ERROR_TEXT: &str = "Connection Error";
pub const STALE_TEXT: &str = "Stale";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Reading,
    Stale,
    ConnectionError,
    /// Start-up and status text.
    Message,
    Blank,
}

/// Two fixed-width lines and a backlight colour hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    pub line1: Line,
    pub line2: Line,
    pub color: Rgb,
    pub kind: FrameKind,
}

impl DisplayFrame {
    /// Cleared screen, backlight off.
    pub fn blank() -> Self {
        Self {
            line1: padded(""),
            line2: padded(""),
            color: BLANK_COLOR,
            kind: FrameKind::Blank,
        }
    }

    pub fn connection_error() -> Self {
        Self {
            line1: padded(CONNECTION_ERROR_TEXT),
            line2: padded(""),
            color: ERROR_COLOR,
            kind: FrameKind::ConnectionError,
        }
    }

    /// Single line of status text.
    pub fn message(text: &str, color: Rgb) -> Self {
        Self {
            line1: padded(text),
            line2: padded(""),
            color,
            kind: FrameKind::Message,
        }
    }

    pub fn reading(reading: &Reading, glyph: Option<char>) -> Self {
        let category = reading.category();
        Self {
            line1: aqi_line(reading),
            line2: status_line(category.label(), glyph),
            color: category.color(),
            kind: FrameKind::Reading,
        }
    }

    /// Last values kept on screen, category replaced by a stale marker.
    pub fn stale(reading: &Reading, glyph: Option<char>) -> Self {
        Self {
            line1: aqi_line(reading),
            line2: status_line(STALE_TEXT, glyph),
            color: STALE_COLOR,
            kind: FrameKind::Stale,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.kind == FrameKind::Blank
    }
}

/// `text` clipped and right-padded to the display width.
pub fn padded(text: &str) -> Line {
    let mut line = Line::new();
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    fill(&mut line, DISPLAY_WIDTH);
    line
}

fn fill(line: &mut Line, up_to: usize) {
    while line.len() < up_to && line.push(' ').is_ok() {}
}

/// `AQI A <avg><m>` + padding + `L <live><m>`.
pub fn aqi_line(reading: &Reading) -> Line {
    let mut left = Line::new();
    let mut right = Line::new();
    // Overflow only clips; a u16 never exceeds the line on its own.
    let _ = write!(
        left,
        "AQI A {}{}",
        reading.aqi_average,
        reading.average_confidence.marker()
    );
    let _ = write!(
        right,
        "L {}{}",
        reading.aqi_live,
        reading.live_confidence.marker()
    );

    let pad = DISPLAY_WIDTH.saturating_sub(left.len() + right.len());
    let target = left.len() + pad;
    let mut line = left;
    fill(&mut line, target);
    for c in right.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    line
}

/// `label` + padding + spinner glyph in the last column.
pub fn status_line(label: &str, glyph: Option<char>) -> Line {
    let mut line = Line::new();
    for c in label.chars().take(DISPLAY_WIDTH - 1) {
        if line.push(c).is_err() {
            break;
        }
    }
    fill(&mut line, DISPLAY_WIDTH - 1);
    let _ = line.push(glyph.unwrap_or(' '));
    line
}
