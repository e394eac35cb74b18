//! Lenient date parsing and day arithmetic
//!
//! Any value that cannot be read as a date becomes `None`; callers store it
//! as a missing cell rather than failing the run.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use super::types::Value;

/// Unambiguous year-first layouts, tried in order
const YEAR_FIRST_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d",
];

/// US-locale layouts, 12-hour clock included (`3/1/2024 2:30:00 PM`)
const MONTH_FIRST_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y",
];

const DAY_FIRST_FORMATS: &[&str] = &[
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y",
];

/// Parses order export date cells
#[derive(Debug, Clone, Copy, Default)]
pub struct DateParser {
    /// Read `01/03/2024` as 1 March instead of January 3
    pub day_first: bool,
}

impl DateParser {
    pub fn new(day_first: bool) -> Self {
        Self { day_first }
    }

    /// Parse a cell into a datetime; `None` when it is not a recognizable date
    pub fn parse(&self, value: &Value) -> Option<NaiveDateTime> {
        match value {
            Value::DateTime(dt) => Some(*dt),
            Value::Text(s) => self.parse_str(s),
            _ => None,
        }
    }

    pub fn parse_str(&self, raw: &str) -> Option<NaiveDateTime> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_local());
        }

        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(d.and_time(NaiveTime::MIN));
        }

        let slash_formats = if self.day_first {
            DAY_FIRST_FORMATS
        } else {
            MONTH_FIRST_FORMATS
        };

        for format in YEAR_FIRST_FORMATS.iter().chain(slash_formats) {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(dt);
            }
            if let Ok(d) = NaiveDate::parse_from_str(s, format) {
                return Some(d.and_time(NaiveTime::MIN));
            }
        }

        None
    }
}

/// Whole days elapsed from `start` to the midnight of `as_of`
///
/// Rounds toward negative infinity, so a creation time later in the day than
/// midnight still counts the partial day as not elapsed.
pub fn days_between(start: NaiveDateTime, as_of: NaiveDate) -> i64 {
    let reference = as_of.and_time(NaiveTime::MIN);
    (reference - start).num_seconds().div_euclid(86_400)
}
