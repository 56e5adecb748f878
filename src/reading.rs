//! Reading acquisition: two endpoints, two channels each, one [`Reading`].
//!
//! ```text
//!            ┌─ ResilientFetcher ─▶ average payload ─▶ ChannelPair ─▶ confidence + AQI ─┐
//!  process ──┤                                                                          ├─▶ Reading
//!            └─ ResilientFetcher ─▶ live payload    ─▶ ChannelPair ─▶ confidence + AQI ─┘
//! ```
//!
//! Either endpoint failing fails the whole cycle; no partial reading is
//! ever produced.

use core::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::aqi::{self, AqiCategory};
use crate::app::events::AppEvent;
use crate::app::ports::{Clock, EventSink, SensorClient};
use crate::confidence::{ChannelPair, ConfidenceFlag};
use crate::error::{ConnectionError, PermanentError};
use crate::retry::{ResilientFetcher, RetryPolicy};

// ───────────────────────────────────────────────────────────────
// Endpoint
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Sensor-side rolling average.
    Average,
    /// Most recent sample.
    Live,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Live => "live",
        }
    }

    /// Query string appended to the sensor URL.
    pub fn query(self) -> &'static str {
        match self {
            Self::Average => "",
            Self::Live => "?live=true",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ───────────────────────────────────────────────────────────────
// Raw payload
// ───────────────────────────────────────────────────────────────

pub const CHANNEL_A_FIELD: &str = "pm2_5_atm";
pub const CHANNEL_B_FIELD: &str = "pm2_5_atm_b";

/// The two PM2.5 fields of a sensor JSON document.  Every other field the
/// sensor reports is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPayload {
    pub pm2_5_atm: Option<f64>,
    pub pm2_5_atm_b: Option<f64>,
}

impl RawPayload {
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            pm2_5_atm: Some(a),
            pm2_5_atm_b: Some(b),
        }
    }

    /// Decode a sensor response body.
    pub fn from_json(body: &[u8]) -> Result<Self, PermanentError> {
        serde_json::from_slice(body).map_err(|_| PermanentError::MalformedPayload)
    }

    pub fn channels(&self) -> Result<ChannelPair, PermanentError> {
        let a = self.pm2_5_atm.ok_or(PermanentError::MissingField(CHANNEL_A_FIELD))?;
        let b = self.pm2_5_atm_b.ok_or(PermanentError::MissingField(CHANNEL_B_FIELD))?;
        Ok(ChannelPair::new(a, b))
    }
}

// ───────────────────────────────────────────────────────────────
// Reading
// ───────────────────────────────────────────────────────────────

/// Snapshot of one processing cycle.  Immutable; the next cycle supersedes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub aqi_average: u16,
    pub aqi_live: u16,
    pub average_confidence: ConfidenceFlag,
    pub live_confidence: ConfidenceFlag,
    /// Channel-averaged PM2.5 behind `aqi_average` (µg/m³).
    pub pm25_average: f64,
    /// Channel-averaged PM2.5 behind `aqi_live` (µg/m³).
    pub pm25_live: f64,
    /// [`Clock::now_ms`] when the cycle completed.
    pub timestamp_ms: u64,
    pub valid: bool,
}

impl Reading {
    /// Marker for a failed cycle.  Carries no measurement.
    pub fn failed(timestamp_ms: u64) -> Self {
        Self {
            aqi_average: 0,
            aqi_live: 0,
            average_confidence: ConfidenceFlag::Low,
            live_confidence: ConfidenceFlag::Low,
            pm25_average: 0.0,
            pm25_live: 0.0,
            timestamp_ms,
            valid: false,
        }
    }

    /// Category of the averaged AQI, which drives label and colour.
    pub fn category(&self) -> AqiCategory {
        AqiCategory::from_aqi(self.aqi_average)
    }

    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp_ms)
    }
}

// ───────────────────────────────────────────────────────────────
// ReadingProcessor
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct EndpointSample {
    aqi: u16,
    pm25: f64,
    confidence: ConfidenceFlag,
}

/// Turns two resilient endpoint fetches into a [`Reading`].
#[derive(Debug, Clone, Copy)]
pub struct ReadingProcessor {
    fetcher: ResilientFetcher,
}

impl ReadingProcessor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            fetcher: ResilientFetcher::new(policy),
        }
    }

    /// Run one cycle: average endpoint, then live endpoint.
    pub fn process(
        &self,
        client: &mut impl SensorClient,
        clock: &mut impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<Reading, ConnectionError> {
        let average = self.sample(Endpoint::Average, client, clock, sink)?;
        let live = self.sample(Endpoint::Live, client, clock, sink)?;

        Ok(Reading {
            aqi_average: average.aqi,
            aqi_live: live.aqi,
            average_confidence: average.confidence,
            live_confidence: live.confidence,
            pm25_average: average.pm25,
            pm25_live: live.pm25,
            timestamp_ms: clock.now_ms(),
            valid: true,
        })
    }

    fn sample(
        &self,
        endpoint: Endpoint,
        client: &mut impl SensorClient,
        clock: &mut impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<EndpointSample, ConnectionError> {
        let payload = self
            .fetcher
            .fetch(endpoint.name(), clock, sink, || client.get(endpoint))
            .map_err(|failure| ConnectionError::new(endpoint, failure))?;

        let pair = payload
            .channels()
            .map_err(|e| ConnectionError::new(endpoint, e))?;
        debug!("{endpoint}: A={:.2} B={:.2}", pair.a, pair.b);

        let confidence = pair.confidence();
        if confidence == ConfidenceFlag::Low {
            sink.emit(&AppEvent::LowConfidence {
                endpoint,
                a: pair.a,
                b: pair.b,
            });
        }

        let pm25 = pair.average();
        let aqi = aqi::convert(pm25)
            .map_err(|e| ConnectionError::new(endpoint, PermanentError::from(e)))?;

        Ok(EndpointSample {
            aqi,
            pm25,
            confidence,
        })
    }
}
