//! Calendar-date arithmetic, recurring rule expansion and habit consistency analytics.
//!
//! Everything in this crate is a pure function of its inputs. Dates are
//! timezone-free [`chrono::NaiveDate`] values and cross string boundaries in
//! `YYYY-MM-DD` form.

pub mod calendar;
pub mod consistency;
pub mod error;
pub mod recurrence;

pub use error::{EngineError, EngineResult};
