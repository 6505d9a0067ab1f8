//! `YYYY-MM-DD` parsing and formatting.

use cadence_core::constants::DATE_FORMAT;
use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};

/// ## Summary
/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Only the zero-padded ten character form is accepted. Timestamps, offsets
/// and unpadded components are rejected so that no value can be reinterpreted
/// through a timezone conversion.
///
/// ## Errors
/// Returns `EngineError::Validation` naming `field` if the value is not in
/// `YYYY-MM-DD` form or does not name a real calendar day.
pub fn parse_date(field: &str, raw: &str) -> EngineResult<NaiveDate> {
    let trimmed = raw.trim();
    if !is_date_shaped(trimmed) {
        return Err(EngineError::validation(
            field,
            format!("expected YYYY-MM-DD, got {raw:?}"),
        ));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|e| {
        EngineError::validation(field, format!("{raw:?} is not a calendar date: {e}"))
    })
}

fn is_date_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
