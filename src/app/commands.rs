//! Inbound commands to the poll loop.
//!
//! These represent button presses (or their console stand-ins) that the
//! [`PollLoop`](super::poll_loop::PollLoop) interprets against the session
//! state.

/// Commands an [`InputSource`](super::ports::InputSource) can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Display on + polling ⇄ display off + paused.
    ModeToggle,

    /// Pause or resume polling; display power unchanged.
    PauseToggle,

    /// Blank the display and leave the loop.
    Shutdown,
}
