//! Note entity and its on-disk timestamp encoding

use chrono::{DateTime, Datelike, Local, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-width UTC encoding so that text order equals time order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Years `TIMESTAMP_FORMAT` writes as four unsigned digits.
const MIN_STORED_YEAR: i32 = 0;
const MAX_STORED_YEAR: i32 = 9999;

const EARLIEST_STORED: &str = "0000-01-01T00:00:00.000000Z";
const LATEST_STORED: &str = "9999-12-31T23:59:59.999999Z";

const DISPLAY_FORMAT: &str = "%b %e %H:%M:%S";

/// A persisted note.
///
/// `id` is assigned by the store and `created_at` by the repository's clock;
/// neither changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Creation time in local time, e.g. `Apr 11 20:07:58`
    pub fn display_timestamp(&self) -> String {
        self.created_at.with_timezone(&Local).format(DISPLAY_FORMAT).to_string()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}: {}", self.id, self.display_timestamp(), self.content)
    }
}

/// Drop precision the store cannot hold, so a created note equals its
/// stored copy.
pub(crate) fn to_stored_precision(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(6)
}

pub(crate) fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Whether `ts` keeps its place in text order once encoded.
pub(crate) fn is_storable(ts: &DateTime<Utc>) -> bool {
    (MIN_STORED_YEAR..=MAX_STORED_YEAR).contains(&ts.year())
}

/// Encode the inclusive lower bound of a range.
///
/// Sub-microsecond parts round up, so nothing stored before `ts` matches.
/// `None` when `ts` lies after every storable instant.
pub(crate) fn encode_range_start(ts: DateTime<Utc>) -> Option<String> {
    let truncated = to_stored_precision(ts);
    let start = if truncated < ts {
        truncated.checked_add_signed(TimeDelta::microseconds(1))?
    } else {
        truncated
    };

    match start.year() {
        year if year < MIN_STORED_YEAR => Some(EARLIEST_STORED.to_string()),
        year if year > MAX_STORED_YEAR => None,
        _ => Some(encode_timestamp(&start)),
    }
}

/// Encode the inclusive upper bound of a range.
///
/// `None` when `ts` lies before every storable instant.
pub(crate) fn encode_range_end(ts: DateTime<Utc>) -> Option<String> {
    let end = to_stored_precision(ts);

    match end.year() {
        year if year < MIN_STORED_YEAR => None,
        year if year > MAX_STORED_YEAR => Some(LATEST_STORED.to_string()),
        _ => Some(encode_timestamp(&end)),
    }
}

pub(crate) fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}
