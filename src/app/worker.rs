//! Fetch-cycle drivers.
//!
//! ```text
//!   PollLoop ──start_cycle──▶ request Signal ──▶ ┌──────────────┐
//!                                                │ fetch thread │  ReadingProcessor::process
//!   PollLoop ◀─take_outcome── outcome Signal ◀── └──────────────┘  (retries sleep here)
//! ```
//!
//! [`FetchWorker`] keeps the retry waits off the loop thread so the display
//! stays responsive.  The outcome slot holds one value; a newer outcome
//! replaces an untaken one.  [`InlineCycles`] runs the cycle on the caller's
//! thread and is what the tests drive.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use futures_lite::future::block_on;
use log::{debug, info};

use super::ports::{Clock, CycleDriver, CycleOutcome, EventSink, SensorClient};
use crate::reading::ReadingProcessor;

// ───────────────────────────────────────────────────────────────
// In-line driver
// ───────────────────────────────────────────────────────────────

/// Runs each cycle to completion inside `start_cycle`.
pub struct InlineCycles<S, C, E> {
    processor: ReadingProcessor,
    client: S,
    clock: C,
    sink: E,
    outcome: Option<CycleOutcome>,
}

impl<S, C, E> InlineCycles<S, C, E>
where
    S: SensorClient,
    C: Clock,
    E: EventSink,
{
    pub fn new(processor: ReadingProcessor, client: S, clock: C, sink: E) -> Self {
        Self {
            processor,
            client,
            clock,
            sink,
            outcome: None,
        }
    }

    pub fn client(&self) -> &S {
        &self.client
    }
}

impl<S, C, E> CycleDriver for InlineCycles<S, C, E>
where
    S: SensorClient,
    C: Clock,
    E: EventSink,
{
    fn start_cycle(&mut self) -> bool {
        let outcome = self
            .processor
            .process(&mut self.client, &mut self.clock, &mut self.sink);
        self.outcome = Some(outcome);
        true
    }

    fn take_outcome(&mut self) -> Option<CycleOutcome> {
        self.outcome.take()
    }

    fn in_flight(&self) -> bool {
        false
    }
}

// ───────────────────────────────────────────────────────────────
// Worker-thread driver
// ───────────────────────────────────────────────────────────────

struct Shared {
    request: Signal<CriticalSectionRawMutex, ()>,
    outcome: Signal<CriticalSectionRawMutex, CycleOutcome>,
    busy: AtomicBool,
    stop: AtomicBool,
}

/// Runs cycles on a dedicated thread, at most one at a time.
pub struct FetchWorker {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl FetchWorker {
    pub fn spawn<S, C, E>(
        processor: ReadingProcessor,
        client: S,
        clock: C,
        sink: E,
    ) -> std::io::Result<Self>
    where
        S: SensorClient + Send + 'static,
        C: Clock + Send + 'static,
        E: EventSink + Send + 'static,
    {
        let shared = Arc::new(Shared {
            request: Signal::new(),
            outcome: Signal::new(),
            busy: AtomicBool::new(false),
            stop: AtomicBool::new(false),
        });
        let worker = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("aqimon-fetch".into())
            .spawn(move || run_worker(&worker, processor, client, clock, sink))?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }
}

fn run_worker<S, C, E>(
    shared: &Shared,
    processor: ReadingProcessor,
    mut client: S,
    mut clock: C,
    mut sink: E,
) where
    S: SensorClient,
    C: Clock,
    E: EventSink,
{
    debug!("fetch worker: started");
    loop {
        block_on(shared.request.wait());
        if shared.stop.load(Ordering::Acquire) {
            break;
        }
        let outcome = processor.process(&mut client, &mut clock, &mut sink);
        shared.outcome.signal(outcome);
        shared.busy.store(false, Ordering::Release);
    }
    debug!("fetch worker: stopped");
}

impl CycleDriver for FetchWorker {
    fn start_cycle(&mut self) -> bool {
        if self
            .shared
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        self.shared.request.signal(());
        true
    }

    fn take_outcome(&mut self) -> Option<CycleOutcome> {
        self.shared.outcome.try_take()
    }

    fn in_flight(&self) -> bool {
        self.shared.busy.load(Ordering::Acquire)
    }
}

impl Drop for FetchWorker {
    /// Stops the thread.  A cycle still retrying is left to finish on its
    /// own instead of holding up shutdown.
    fn drop(&mut self) {
        self.shared.stop.store(true, Ordering::Release);
        self.shared.request.signal(());
        if let Some(handle) = self.handle.take() {
            if self.in_flight() {
                info!("fetch worker: cycle in flight, not waiting for it");
            } else {
                let _ = handle.join();
            }
        }
    }
}
