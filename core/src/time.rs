//! Time related utils.

use chrono::prelude::*;

use crate::{Error, Result};

/// DateTime is an alias of `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// The timestamp format carried on the wire: `20220313T07:20:04+0000`.
///
/// UTC, second precision, locale independent. The verifying server parses
/// this exact shape, so the format string must not change.
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H:%M:%S+0000";

/// Create a new DateTime with current time, in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a time into the wire timestamp: `20220313T07:20:04+0000`.
pub fn format_timestamp(t: DateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a wire timestamp back into a DateTime.
pub fn parse_timestamp(s: &str) -> Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| Error::unexpected(format!("invalid timestamp: {s}")).with_source(e))?;
    Ok(t.and_utc())
}
