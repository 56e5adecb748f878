//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! `log` facade, one tagged line per event.  Retry noise goes out at `warn`,
//! terminal failures at `error`.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | monitor running");
            }
            AppEvent::AttemptFailed {
                operation,
                attempt,
                max_attempts,
                remaining,
                retry_in,
                error,
            } => match retry_in {
                Some(delay) => warn!(
                    "FETCH | {operation} attempt {attempt}/{max_attempts} failed: {error} | \
                     {remaining} left, retry in {:.1}s",
                    delay.as_secs_f32()
                ),
                None => warn!(
                    "FETCH | {operation} attempt {attempt}/{max_attempts} failed: {error} | none left"
                ),
            },
            AppEvent::RetryExhausted { operation, error } => {
                error!("FETCH | {operation} {error}");
            }
            AppEvent::PermanentFailure { operation, error } => {
                error!("FETCH | {operation} unusable response: {error}");
            }
            AppEvent::LowConfidence { endpoint, a, b } => {
                info!("CONF  | {endpoint} channels disagree: A={a:.1} B={b:.1}");
            }
            AppEvent::ReadingUpdated(r) => {
                info!(
                    "AQI   | avg={}{} live={}{} | PM2.5 avg={:.1} live={:.1}",
                    r.aqi_average,
                    r.average_confidence.marker(),
                    r.aqi_live,
                    r.live_confidence.marker(),
                    r.pm25_average,
                    r.pm25_live,
                );
            }
            AppEvent::ConnectionError(e) => {
                error!("CONN  | {e}");
            }
            AppEvent::CycleSkipped => {
                warn!("FETCH | previous cycle still running, poll skipped");
            }
            AppEvent::ModeChanged { display_on, active } => {
                info!(
                    "MODE  | display={} polling={}",
                    if *display_on { "on" } else { "off" },
                    if *active { "active" } else { "paused" },
                );
            }
            AppEvent::QuietHours(true) => {
                info!("MODE  | quiet hours began");
            }
            AppEvent::QuietHours(false) => {
                info!("MODE  | quiet hours ended");
            }
            AppEvent::ReadingStale { age_secs } => {
                warn!("AQI   | reading is {age_secs}s old, marked stale");
            }
            AppEvent::Stopped => {
                info!("STOP  | display blanked");
            }
        }
    }
}
