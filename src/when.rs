//! Time expressions - human phrases for the bounds of a listing window
//!
//! Supported forms (case-insensitive, relative to "now"):
//! - `now`, `today`, `yesterday`, `tomorrow` (the last three mean local midnight)
//! - `<n> <unit> ago`, `in <n> <unit>`, `last <unit>`, `next <unit>`
//!   where `<n>` is a number, `a`, `an` or `one`
//! - `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` (local time) and RFC 3339

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use crate::{Error, Result};
use std::str::FromStr;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Units accepted in relative expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    /// Length in seconds for fixed-size units
    fn seconds(&self) -> Option<i64> {
        match self {
            Unit::Second => Some(1),
            Unit::Minute => Some(60),
            Unit::Hour => Some(3_600),
            Unit::Day => Some(86_400),
            Unit::Week => Some(604_800),
            Unit::Month | Unit::Year => None,
        }
    }

    fn shift<Tz: TimeZone>(
        &self,
        from: &DateTime<Tz>,
        count: u32,
        forward: bool,
    ) -> Option<DateTime<Tz>> {
        let from = from.clone();

        match self.seconds() {
            Some(seconds) => {
                let delta = TimeDelta::try_seconds(i64::from(count) * seconds)?;
                if forward {
                    from.checked_add_signed(delta)
                } else {
                    from.checked_sub_signed(delta)
                }
            }
            None => {
                let months = match self {
                    Unit::Year => count.checked_mul(12)?,
                    _ => count,
                };
                if forward {
                    from.checked_add_months(Months::new(months))
                } else {
                    from.checked_sub_months(Months::new(months))
                }
            }
        }
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "second" | "seconds" | "sec" | "secs" => Ok(Unit::Second),
            "minute" | "minutes" | "min" | "mins" => Ok(Unit::Minute),
            "hour" | "hours" | "hr" | "hrs" => Ok(Unit::Hour),
            "day" | "days" => Ok(Unit::Day),
            "week" | "weeks" => Ok(Unit::Week),
            "month" | "months" => Ok(Unit::Month),
            "year" | "years" => Ok(Unit::Year),
            _ => Err(Error::InvalidTimeExpression(format!("unknown unit: {}", s))),
        }
    }
}

/// Parse an expression relative to `now`, interpreting dates in `now`'s zone
pub fn parse_relative_to<Tz: TimeZone>(expr: &str, now: DateTime<Tz>) -> Result<DateTime<Utc>> {
    let invalid = || Error::InvalidTimeExpression(expr.to_string());

    let normalized = expr.trim().to_lowercase();
    let words: Vec<&str> = normalized.split_whitespace().collect();

    let resolved = match words.as_slice() {
        ["now"] => Some(now.clone()),
        ["today"] => start_of_day(&now, 0),
        ["yesterday"] => start_of_day(&now, -1),
        ["tomorrow"] => start_of_day(&now, 1),
        [count, unit, "ago"] => relative(&now, count, unit, false),
        ["in", count, unit] => relative(&now, count, unit, true),
        ["last", unit] => relative(&now, "1", unit, false),
        ["next", unit] => relative(&now, "1", unit, true),
        _ => return parse_absolute(expr.trim(), &now.timezone()).ok_or_else(invalid),
    };

    resolved.map(|ts| ts.with_timezone(&Utc)).ok_or_else(invalid)
}

fn relative<Tz: TimeZone>(
    now: &DateTime<Tz>,
    count: &str,
    unit: &str,
    forward: bool,
) -> Option<DateTime<Tz>> {
    let count: u32 = match count {
        "a" | "an" | "one" => 1,
        digits => digits.parse().ok()?,
    };
    let unit = Unit::from_str(unit).ok()?;
    unit.shift(now, count, forward)
}

fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>, offset_days: i64) -> Option<DateTime<Tz>> {
    let date = now
        .date_naive()
        .checked_add_signed(TimeDelta::try_days(offset_days)?)?;
    at_local(&now.timezone(), date.and_hms_opt(0, 0, 0)?)
}

fn at_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    // earliest() resolves DST overlaps; gaps have no valid instant
    tz.from_local_datetime(&naive).earliest()
}

fn parse_absolute<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return at_local(tz, naive).map(|ts| ts.with_timezone(&Utc));
        }
    }

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    at_local(tz, date.and_hms_opt(0, 0, 0)?).map(|ts| ts.with_timezone(&Utc))
}
