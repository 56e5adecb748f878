//! aqimon main entry point
//!
//! Wires the host adapters around the poll loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HttpSensorClient   LogEventSink   JsonFileConfig            │
//! │  (SensorClient)     (EventSink)    (ConfigPort)              │
//! │  ConsoleRenderer    stdin reader   SystemClock               │
//! │  (Renderer)         (→ COMMANDS)   (Clock)                   │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌───────────────┐  Signal  ┌─────────────────────────────┐  │
//! │  │ FetchWorker   │◀────────▶│ PollLoop                    │  │
//! │  │ ReadingProc.  │          │ DisplaySession · schedule   │  │
//! │  └───────────────┘          └─────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use env_logger::Env;
use log::{info, warn};

use aqimon::adapters::config_file::JsonFileConfig;
use aqimon::adapters::console::{spawn_stdin_reader, ConsoleRenderer};
use aqimon::adapters::http_client::HttpSensorClient;
use aqimon::adapters::log_sink::LogEventSink;
use aqimon::adapters::time::SystemClock;
use aqimon::app::poll_loop::{LoopExit, PollLoop};
use aqimon::app::ports::{ConfigError, ConfigPort};
use aqimon::app::worker::FetchWorker;
use aqimon::config::MonitorConfig;
use aqimon::input::{QueuedInput, COMMANDS};
use aqimon::reading::ReadingProcessor;

const DEFAULT_CONFIG_PATH: &str = "aqimon.json";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("aqimon v{}", env!("CARGO_PKG_VERSION"));

    // ── Configuration ─────────────────────────────────────────
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = match JsonFileConfig::new(&path).load() {
        Ok(c) => c,
        Err(ConfigError::NotFound) => {
            warn!("No config at {path}, using defaults");
            MonitorConfig::default()
        }
        Err(e) => {
            warn!("Config load failed ({e}), using defaults");
            MonitorConfig::default()
        }
    };
    info!(
        "Sensor {} | poll {}s | {} attempts | on exhaustion: {:?}",
        config.sensor_url,
        config.poll_interval_secs,
        config.retry_max_attempts,
        config.on_retry_exhausted,
    );

    // ── Adapters ──────────────────────────────────────────────
    let client = HttpSensorClient::new(config.sensor_url.clone(), config.request_timeout())
        .context("building HTTP client")?;
    let mut clock = SystemClock::new();
    let worker = FetchWorker::spawn(
        ReadingProcessor::new(config.retry_policy()),
        client,
        clock,
        LogEventSink::new(),
    )
    .context("starting fetch worker")?;
    spawn_stdin_reader(&COMMANDS).context("starting input reader")?;
    info!("Keys: m = display on/off, p = pause, q = quit");

    // ── Event loop ────────────────────────────────────────────
    let mut poll = PollLoop::new(&config, worker);
    let exit = poll.run(
        &mut clock,
        &mut QueuedInput::global(),
        &mut ConsoleRenderer::stdout(),
        &mut LogEventSink::new(),
    );

    match exit {
        LoopExit::Shutdown => {
            info!("Shut down");
            Ok(())
        }
        LoopExit::RetryExhausted(e) => {
            Err(anyhow::Error::new(e).context("sensor unreachable, giving up"))
        }
    }
}
