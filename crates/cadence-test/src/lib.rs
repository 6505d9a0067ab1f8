//! Cadence - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use `cadence_test::` paths.

pub use cadence_calendar as calendar;
pub use cadence_core::config;
pub use cadence_service as service;
