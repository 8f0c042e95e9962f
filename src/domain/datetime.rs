//! Purchase timestamp formats.
//!
//! The backend speaks second precision (`2025-06-15T10:30:00`), the edit
//! surface minute precision (`2025-06-15T10:30`). Values are carried as
//! strings in their wire form; chrono is only used to validate input.

use chrono::{NaiveDateTime, ParseError};

/// Edit format, minute precision.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const INPUT_LEN: usize = 16;

/// Truncate a wire timestamp to the minute-precision edit format.
/// Values already shorter than the edit format pass through unchanged.
pub fn to_input_format(dt: &str) -> String {
    match dt.get(..INPUT_LEN) {
        Some(prefix) => prefix.to_string(),
        None => dt.to_string(),
    }
}

/// Expand a minute-precision edit value to the wire format, assuming `:00`
/// seconds. Values not in the edit format pass through unchanged.
pub fn to_api_format(dt: &str) -> String {
    if dt.len() == INPUT_LEN {
        format!("{dt}:00")
    } else {
        dt.to_string()
    }
}

/// Validate a minute-precision edit value.
pub fn parse_input(dt: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(dt, INPUT_FORMAT)
}
