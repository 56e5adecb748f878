//! Mock adapters for integration tests.
//!
//! Clock and event recorder hand out clones that share state, so the same
//! instance can be moved into a cycle driver and still be inspected (or
//! advanced) by the test.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use aqimon::app::commands::AppCommand;
use aqimon::app::events::AppEvent;
use aqimon::app::ports::{Clock, EventSink, InputSource, Renderer, SensorClient};
use aqimon::display::DisplayFrame;
use aqimon::error::{FetchError, TransientError};
use aqimon::reading::RawPayload;

pub type Response = Result<RawPayload, FetchError>;

pub fn refused() -> Response {
    Err(FetchError::Transient(TransientError::ConnectionFailed))
}

// ── ScriptedSensor ────────────────────────────────────────────

/// Replays scripted responses per endpoint; the last entry repeats forever.
pub struct ScriptedSensor {
    average: VecDeque<Response>,
    live: VecDeque<Response>,
    pub average_calls: u32,
    pub live_calls: u32,
}

#[allow(dead_code)]
impl ScriptedSensor {
    pub fn new(average: Vec<Response>, live: Vec<Response>) -> Self {
        Self {
            average: average.into(),
            live: live.into(),
            average_calls: 0,
            live_calls: 0,
        }
    }

    /// Both endpoints answer the same values every time.
    pub fn steady(average: (f64, f64), live: (f64, f64)) -> Self {
        Self::new(
            vec![Ok(RawPayload::new(average.0, average.1))],
            vec![Ok(RawPayload::new(live.0, live.1))],
        )
    }

    pub fn unreachable() -> Self {
        Self::new(vec![refused()], vec![refused()])
    }

    fn next(script: &mut VecDeque<Response>) -> Response {
        if script.len() > 1 {
            script.pop_front().unwrap_or_else(refused)
        } else {
            script.front().copied().unwrap_or_else(refused)
        }
    }
}

impl SensorClient for ScriptedSensor {
    fn get_average(&mut self) -> Response {
        self.average_calls += 1;
        Self::next(&mut self.average)
    }

    fn get_live(&mut self) -> Response {
        self.live_calls += 1;
        Self::next(&mut self.live)
    }
}

// ── FakeClock ─────────────────────────────────────────────────

#[derive(Default)]
struct ClockState {
    now_ms: u64,
    hour: Option<u8>,
    sleeps: Vec<Duration>,
}

/// Manual clock.  `sleep` advances time instantly and is recorded.
#[derive(Clone, Default)]
pub struct FakeClock(Rc<RefCell<ClockState>>);

#[allow(dead_code)]
impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ms(&self, now_ms: u64) {
        self.0.borrow_mut().now_ms = now_ms;
    }

    pub fn set_hour(&self, hour: u8) {
        self.0.borrow_mut().hour = Some(hour);
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.0.borrow().sleeps.clone()
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.0.borrow().now_ms
    }

    fn local_hour(&self) -> Option<u8> {
        self.0.borrow().hour
    }

    fn sleep(&mut self, duration: Duration) {
        let mut s = self.0.borrow_mut();
        s.now_ms += duration.as_millis() as u64;
        s.sleeps.push(duration);
    }
}

// ── RecordingRenderer ─────────────────────────────────────────

#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<DisplayFrame>,
}

#[allow(dead_code)]
impl RecordingRenderer {
    pub fn last(&self) -> &DisplayFrame {
        self.frames.last().expect("nothing rendered")
    }
}

impl Renderer for RecordingRenderer {
    fn show(&mut self, frame: &DisplayFrame) {
        self.frames.push(frame.clone());
    }
}

// ── ScriptedInput ─────────────────────────────────────────────

/// Delivers each command once the shared clock reaches its timestamp.
pub struct ScriptedInput {
    clock: FakeClock,
    script: VecDeque<(u64, AppCommand)>,
}

#[allow(dead_code)]
impl ScriptedInput {
    pub fn none() -> Self {
        Self::timed(FakeClock::new(), Vec::new())
    }

    pub fn timed(clock: FakeClock, script: Vec<(u64, AppCommand)>) -> Self {
        Self {
            clock,
            script: script.into(),
        }
    }

    /// Commands due on the next poll, regardless of time.
    pub fn now(commands: &[AppCommand]) -> Self {
        Self::timed(FakeClock::new(), commands.iter().map(|c| (0, *c)).collect())
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<AppCommand> {
        let (at, _) = self.script.front()?;
        if self.clock.now_ms() < *at {
            return None;
        }
        self.script.pop_front().map(|(_, c)| c)
    }
}

// ── Recorder ──────────────────────────────────────────────────

/// Event sink whose clones append to one shared log.
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<AppEvent>>>);

#[allow(dead_code)]
impl Recorder {
    pub fn events(&self) -> Vec<AppEvent> {
        self.0.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl EventSink for Recorder {
    fn emit(&mut self, event: &AppEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}
