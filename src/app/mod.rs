//! Application core: orchestration with no direct I/O.
//!
//! The [`poll_loop`] drives the acquisition cadence and the display session;
//! the [`worker`] module runs processing cycles either in-line or on a
//! dedicated thread.  The network, the display, the buttons and the clock
//! are reached only through the **port traits** in [`ports`].

pub mod commands;
pub mod events;
pub mod poll_loop;
pub mod ports;
pub mod worker;
