//! PM2.5 air-quality monitor library.
//!
//! Exposes the acquisition engine (retry, confidence, AQI conversion), the
//! display session and the poll loop for the binary and for integration
//! testing.  All I/O sits behind the port traits in [`app::ports`]; the
//! stock implementations live in [`adapters`].

#![deny(unused_must_use)]

pub mod app;
pub mod aqi;
pub mod confidence;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod reading;
pub mod retry;
pub mod schedule;

pub mod adapters;
