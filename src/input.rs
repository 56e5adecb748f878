//! Bounded command queue between input producers and the poll loop.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌──────────────┐
//! │ stdin thread │────▶│ CommandQueue  │────▶│  PollLoop    │
//! │ buttons      │────▶│ (capacity 8)  │     │  fast tick   │
//! └──────────────┘     └───────────────┘     └──────────────┘
//! ```
//!
//! Producers never block: a command pushed into a full queue is dropped.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::commands::AppCommand;
use crate::app::ports::InputSource;

/// Maximum number of pending commands.
pub const COMMAND_QUEUE_CAP: usize = 8;

pub struct CommandQueue {
    channel: Channel<CriticalSectionRawMutex, AppCommand, COMMAND_QUEUE_CAP>,
}

impl CommandQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Returns `false` if the queue is full (command dropped).
    pub fn push(&self, command: AppCommand) -> bool {
        match self.channel.try_send(command) {
            Ok(()) => true,
            Err(_) => {
                warn!("input: queue full, dropped {command:?}");
                false
            }
        }
    }

    pub fn pop(&self) -> Option<AppCommand> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide queue fed by the input adapters.
pub static COMMANDS: CommandQueue = CommandQueue::new();

/// [`InputSource`] draining a [`CommandQueue`].
#[derive(Clone, Copy)]
pub struct QueuedInput<'q> {
    queue: &'q CommandQueue,
}

impl<'q> QueuedInput<'q> {
    pub fn new(queue: &'q CommandQueue) -> Self {
        Self { queue }
    }
}

impl QueuedInput<'static> {
    /// Drains the process-wide [`COMMANDS`] queue.
    pub fn global() -> Self {
        Self::new(&COMMANDS)
    }
}

impl InputSource for QueuedInput<'_> {
    fn poll(&mut self) -> Option<AppCommand> {
        self.queue.pop()
    }
}
