//! PM2.5 → AQI conversion.
//!
//! Piecewise-linear interpolation over a fixed six-segment breakpoint table.
//! This is an instantaneous "AQI", not the official 24-hour average and not
//! NowCast.
//!
//! | Category       | AQI       | PM2.5 (µg/m³)   |
//! |----------------|-----------|-----------------|
//! | Good           | 0–50      | 0.0–12.0        |
//! | Moderate       | 51–100    | 12.1–35.4       |
//! | Sensitive      | 101–150   | 35.5–55.4       |
//! | Unhealthy      | 151–200   | 55.5–150.4      |
//! | Very Unhealthy | 201–300   | 150.5–250.4     |
//! | Hazardous      | 301–500   | 250.5–500.4 (open-ended) |
//!
//! ## Rounding
//!
//! The interpolated value is rounded half away from zero (`f64::round`),
//! which for the non-negative domain here is round-half-up.  Callers must not
//! rely on a particular tie-break.

use crate::error::AqiError;

/// Colour as (R, G, B) tuple, channel scale 0–255.
pub type Rgb = (u8, u8, u8);

/// One interpolation segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub index_low: u16,
    pub index_high: u16,
    pub conc_low: f64,
    pub conc_high: f64,
}

impl Breakpoint {
    const fn new(index_low: u16, index_high: u16, conc_low: f64, conc_high: f64) -> Self {
        Self {
            index_low,
            index_high,
            conc_low,
            conc_high,
        }
    }

    fn interpolate(&self, pm25: f64) -> f64 {
        let slope = f64::from(self.index_high - self.index_low) / (self.conc_high - self.conc_low);
        slope * (pm25 - self.conc_low) + f64::from(self.index_low)
    }
}

/// Sorted ascending by `conc_low`; the last entry is open-ended.
pub const PM25_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(0, 50, 0.0, 12.0),
    Breakpoint::new(51, 100, 12.1, 35.4),
    Breakpoint::new(101, 150, 35.5, 55.4),
    Breakpoint::new(151, 200, 55.5, 150.4),
    Breakpoint::new(201, 300, 150.5, 250.4),
    Breakpoint::new(301, 500, 250.5, 500.4),
];

/// Highest index the display shows; the open top bucket saturates here.
pub const AQI_MAX: u16 = 500;

/// Truncate toward zero at 0.1 granularity (12.049 → 12.0, never 12.1).
pub fn truncate_tenths(pm25: f64) -> f64 {
    (pm25 * 10.0).trunc() / 10.0
}

/// Convert a PM2.5 concentration to an integer AQI.
///
/// Negative input (sensor noise) is clamped to zero before truncation.
/// Concentrations beyond the last breakpoint saturate at [`AQI_MAX`].
/// Only a non-finite input can miss every breakpoint.
pub fn convert(pm25: f64) -> Result<u16, AqiError> {
    let clamped = if pm25 < 0.0 { 0.0 } else { pm25 };
    let pm25 = truncate_tenths(clamped);

    let last = PM25_BREAKPOINTS.len() - 1;
    let segment = PM25_BREAKPOINTS
        .iter()
        .enumerate()
        .find(|(i, bp)| bp.conc_low <= pm25 && (pm25 <= bp.conc_high || *i == last))
        .map(|(_, bp)| bp)
        .ok_or(AqiError::OutOfRange)?;

    let index = segment.interpolate(pm25).round();
    if !index.is_finite() {
        return Err(AqiError::OutOfRange);
    }
    Ok((index as u16).min(AQI_MAX))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Qualitative band for an AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AqiCategory {
    Good,
    Moderate,
    Sensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::Sensitive,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    /// Display label; at most 14 characters so a spinner glyph still fits.
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Sensitive => "Sensitive",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Backlight colour hint.
    pub fn color(self) -> Rgb {
        match self {
            Self::Good => (0, 100, 0),
            Self::Moderate => (100, 100, 0),
            Self::Sensitive => (100, 100, 100),
            Self::Unhealthy => (100, 0, 0),
            Self::VeryUnhealthy => (100, 0, 100),
            Self::Hazardous => (0, 0, 100),
        }
    }
}
