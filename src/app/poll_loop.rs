//! The poll loop. Owns session state and drives the cadence.
//!
//! Each fast tick runs the same fixed sequence:
//!
//! ```text
//!  ┌────────────┐   ┌─────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────┐
//!  │ drain      │──▶│ quiet-hours │──▶│ start cycle  │──▶│ take outcome │──▶│ spinner, │
//!  │ input      │   │ window      │   │ (if due)     │   │ into session │   │ render   │
//!  └────────────┘   └─────────────┘   └──────────────┘   └──────────────┘   └──────────┘
//! ```
//!
//! A cycle is started only when polling is ACTIVE, the quiet-hours window
//! is closed and the schedule says a poll is due.  The one exception is the
//! very first cycle, which also runs inside the window.  While the window is
//! open, ACTIVE stays forced to PAUSED whatever the user presses.  The loop never waits on
//! a cycle: outcomes are picked up on whichever tick they appear.

use core::time::Duration;

use log::{info, warn};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{Clock, CycleDriver, EventSink, InputSource, Renderer};
use crate::config::{ExhaustedPolicy, MonitorConfig};
use crate::display::frame::STARTUP_COLOR;
use crate::display::{DisplayFrame, DisplaySession, READY_TEXT, SessionState};
use crate::error::ConnectionError;
use crate::schedule::{PollSchedule, QuietHours};

/// Why [`PollLoop::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// A shutdown command arrived.
    Shutdown,
    /// A cycle ran out of retries under [`ExhaustedPolicy::Exit`].
    RetryExhausted(ConnectionError),
}

pub struct PollLoop<D: CycleDriver> {
    cycles: D,
    session: DisplaySession,
    state: SessionState,
    schedule: PollSchedule,
    quiet_hours: Option<QuietHours>,
    /// Inside the quiet-hours window as of the last tick.
    quiet: bool,
    /// The current pause was imposed by quiet hours, not by the user.
    forced_pause: bool,
    on_exhausted: ExhaustedPolicy,
    fast_tick: Duration,
    last_frame: Option<DisplayFrame>,
    stale_reported: bool,
}

impl<D: CycleDriver> PollLoop<D> {
    pub fn new(config: &MonitorConfig, cycles: D) -> Self {
        Self {
            cycles,
            session: DisplaySession::new(config.stale_after()),
            state: SessionState::default(),
            schedule: PollSchedule::new(config.poll_interval()),
            quiet_hours: config.quiet_hours,
            quiet: false,
            forced_pause: false,
            on_exhausted: config.on_retry_exhausted,
            fast_tick: config.fast_tick(),
            last_frame: None,
            stale_reported: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> &DisplaySession {
        &self.session
    }

    pub fn cycles(&self) -> &D {
        &self.cycles
    }

    /// Frame most recently sent to the renderer.
    pub fn last_frame(&self) -> Option<&DisplayFrame> {
        self.last_frame.as_ref()
    }

    /// Show the start-up frame.
    pub fn start(&mut self, renderer: &mut impl Renderer, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        self.present(DisplayFrame::message(READY_TEXT, STARTUP_COLOR), renderer);
    }

    /// Apply a toggle command.  Returns `false` for [`AppCommand::Shutdown`].
    pub fn handle_command(&mut self, command: AppCommand, sink: &mut impl EventSink) -> bool {
        match command {
            AppCommand::ModeToggle => self.state.toggle_mode(),
            AppCommand::PauseToggle => self.state.toggle_pause(),
            AppCommand::Shutdown => return false,
        }
        if self.quiet && self.state.active {
            // Polling stays suppressed until the window closes.
            self.state.active = false;
            self.forced_pause = true;
        } else {
            self.forced_pause = false;
        }
        self.emit_mode(sink);
        true
    }

    /// One fast tick.  Returns `Some` when the loop should stop.
    pub fn tick(
        &mut self,
        now_ms: u64,
        local_hour: Option<u8>,
        input: &mut impl InputSource,
        renderer: &mut impl Renderer,
        sink: &mut impl EventSink,
    ) -> Option<LoopExit> {
        while let Some(command) = input.poll() {
            if !self.handle_command(command, sink) {
                return Some(LoopExit::Shutdown);
            }
        }

        self.update_quiet_hours(local_hour, sink);

        // The first cycle is exempt from quiet hours.
        let may_poll = if self.schedule.has_polled() {
            self.state.active && !self.quiet
        } else {
            self.state.active || self.forced_pause
        };
        if may_poll && self.schedule.is_due(now_ms) {
            if !self.cycles.start_cycle() {
                sink.emit(&AppEvent::CycleSkipped);
            }
            self.schedule.mark_polled(now_ms);
        }

        if let Some(outcome) = self.cycles.take_outcome() {
            match &outcome {
                Ok(reading) => sink.emit(&AppEvent::ReadingUpdated(*reading)),
                Err(e) => sink.emit(&AppEvent::ConnectionError(*e)),
            }
            self.session.accept(&outcome, now_ms);
            self.stale_reported = false;

            if let Err(e) = outcome {
                if e.is_retry_exhausted() && self.on_exhausted == ExhaustedPolicy::Exit {
                    warn!("poll loop: retries exhausted, exiting");
                    return Some(LoopExit::RetryExhausted(e));
                }
            }
        }

        if !self.stale_reported {
            if let Some(age_secs) = self.session.stale_age_secs(now_ms) {
                sink.emit(&AppEvent::ReadingStale { age_secs });
                self.stale_reported = true;
            }
        }

        let frame = self.session.render(&self.state, now_ms);
        self.present(frame, renderer);
        self.state.advance_spinner();
        None
    }

    /// Tick until shutdown or a terminal error, sleeping one fast tick in between.
    pub fn run(
        &mut self,
        clock: &mut impl Clock,
        input: &mut impl InputSource,
        renderer: &mut impl Renderer,
        sink: &mut impl EventSink,
    ) -> LoopExit {
        info!(
            "poll loop: every {:?}, fast tick {:?}",
            self.schedule.interval(),
            self.fast_tick
        );
        self.start(renderer, sink);
        loop {
            let now = clock.now_ms();
            if let Some(exit) = self.tick(now, clock.local_hour(), input, renderer, sink) {
                self.shutdown(renderer, sink);
                return exit;
            }
            clock.sleep(self.fast_tick);
        }
    }

    /// Blank the display.  Always sent, even if the screen is already blank.
    pub fn shutdown(&mut self, renderer: &mut impl Renderer, sink: &mut impl EventSink) {
        let blank = DisplayFrame::blank();
        renderer.show(&blank);
        self.last_frame = Some(blank);
        sink.emit(&AppEvent::Stopped);
    }

    fn update_quiet_hours(&mut self, local_hour: Option<u8>, sink: &mut impl EventSink) {
        let quiet = match (self.quiet_hours, local_hour) {
            (Some(window), Some(hour)) => window.is_quiet(hour),
            _ => false,
        };
        if quiet == self.quiet {
            return;
        }
        self.quiet = quiet;
        sink.emit(&AppEvent::QuietHours(quiet));

        if quiet && self.state.active {
            self.state.active = false;
            self.forced_pause = true;
            self.emit_mode(sink);
        } else if !quiet && self.forced_pause {
            self.state.active = true;
            self.forced_pause = false;
            self.emit_mode(sink);
        }
    }

    fn emit_mode(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::ModeChanged {
            display_on: self.state.display_on,
            active: self.state.active,
        });
    }

    fn present(&mut self, frame: DisplayFrame, renderer: &mut impl Renderer) {
        if self.last_frame.as_ref() == Some(&frame) {
            return;
        }
        renderer.show(&frame);
        self.last_frame = Some(frame);
    }
}
