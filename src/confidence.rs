//! Dual-channel confidence check.
//!
//! The sensor carries two laser counters (channel A and channel B) sampling
//! the same air.  When they diverge the averaged value is flagged as
//! low-confidence.

/// Absolute divergence (µg/m³) at or above which the pair is untrusted.
pub const MAX_ABS_DIFF: f64 = 5.0;

/// Relative divergence at or above which the pair is untrusted.
pub const MAX_PCT_DIFF: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceFlag {
    Good,
    Low,
}

impl ConfidenceFlag {
    /// One-character marker placed after an AQI value on the display.
    pub fn marker(self) -> char {
        match self {
            Self::Good => ' ',
            Self::Low => '*',
        }
    }
}

/// Two redundant PM2.5 samples taken at the same instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelPair {
    pub a: f64,
    pub b: f64,
}

impl ChannelPair {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn average(&self) -> f64 {
        (self.a + self.b) / 2.0
    }

    pub fn confidence(&self) -> ConfidenceFlag {
        evaluate(self.a, self.b)
    }
}

/// Flag the pair `Low` when the channels diverge by ≥ 5 µg/m³ or ≥ 70 %.
///
/// The relative difference is taken against `a + b / 2`, not the mean.
/// Changing the denominator moves the marker at category boundaries.
pub fn evaluate(a: f64, b: f64) -> ConfidenceFlag {
    let diff = (a - b).abs();
    let pct_diff = if a + b == 0.0 { 0.0 } else { diff / (a + b / 2.0) };

    if diff >= MAX_ABS_DIFF || pct_diff >= MAX_PCT_DIFF {
        ConfidenceFlag::Low
    } else {
        ConfidenceFlag::Good
    }
}
