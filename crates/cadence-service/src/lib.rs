//! Batch application of the calendar engine to persisted rules and habits.
//!
//! Failures are scoped to the single rule or habit that caused them; one bad
//! record never fails the batch.

pub mod error;
pub mod forecast;
pub mod habits;
