//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  No network, terminal or real time is involved.

mod mocks;
mod processor_tests;
