//! Monitor configuration parameters
//!
//! All tunable parameters for the monitor.  Values are loaded through the
//! [`ConfigPort`](crate::app::ports::ConfigPort); any field missing from the
//! stored document takes its default.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::retry::RetryPolicy;
use crate::schedule::QuietHours;

/// What the poll loop does once a cycle has run out of retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustedPolicy {
    /// Blank the display and leave the loop with an error.
    #[default]
    Exit,
    /// Show the connection-error frame and keep polling.
    Continue,
}

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- Sensor ---
    /// Average endpoint; the live endpoint is this URL plus `?live=true`
    pub sensor_url: String,
    /// HTTP request timeout (seconds)
    pub request_timeout_secs: u32,

    // --- Timing ---
    /// Outer poll period (seconds)
    pub poll_interval_secs: u32,
    /// Inner fast-tick period (milliseconds)
    pub fast_tick_ms: u32,

    // --- Retry ---
    /// Attempts per endpoint, including the first
    pub retry_max_attempts: u32,
    /// Wait after the first failed attempt (milliseconds)
    pub retry_initial_delay_ms: u32,
    /// Added to the wait after every further failure (milliseconds)
    pub retry_escalation_ms: u32,
    pub on_retry_exhausted: ExhaustedPolicy,

    // --- Display ---
    /// Local window with polling suppressed; `None` disables
    pub quiet_hours: Option<QuietHours>,
    /// Readings older than this render as stale; `None` keeps them indefinitely
    pub stale_after_secs: Option<u32>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Sensor
            sensor_url: String::from("http://192.168.1.225/json"),
            request_timeout_secs: 10,

            // Timing
            poll_interval_secs: 45,
            fast_tick_ms: 50, // 20 Hz

            // Retry
            retry_max_attempts: 5,
            retry_initial_delay_ms: 2000,
            retry_escalation_ms: 2000,
            on_retry_exhausted: ExhaustedPolicy::Exit,

            // Display
            quiet_hours: Some(QuietHours::default()),
            stale_after_secs: None,
        }
    }
}

impl MonitorConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor_url.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("sensor_url must not be empty"));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_secs must be > 0"));
        }
        if self.fast_tick_ms == 0 {
            return Err(ConfigError::ValidationFailed("fast_tick_ms must be > 0"));
        }
        if u64::from(self.fast_tick_ms) >= u64::from(self.poll_interval_secs) * 1000 {
            return Err(ConfigError::ValidationFailed(
                "fast_tick_ms must be shorter than poll_interval_secs",
            ));
        }
        if self.retry_max_attempts == 0 {
            return Err(ConfigError::ValidationFailed("retry_max_attempts must be > 0"));
        }
        if let Some(q) = self.quiet_hours {
            if !q.is_valid() {
                return Err(ConfigError::ValidationFailed("quiet_hours must be 0–23"));
            }
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_attempts,
            Duration::from_millis(u64::from(self.retry_initial_delay_ms)),
            Duration::from_millis(u64::from(self.retry_escalation_ms)),
        )
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.poll_interval_secs))
    }

    pub fn fast_tick(&self) -> Duration {
        Duration::from_millis(u64::from(self.fast_tick_ms))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.request_timeout_secs))
    }

    pub fn stale_after(&self) -> Option<Duration> {
        self.stale_after_secs
            .map(|s| Duration::from_secs(u64::from(s)))
    }
}
