//! Time-of-day arithmetic for AOC timestamps.
//!
//! AOC writes every timestamp as a fixed-width `HH:MM:SS.mmm` UTC time of day
//! without a date, and prints durations in the same shape. Durations and the
//! end-of-day stamp `24:00:00.000` go past a clock day, so only the shape is
//! checked. Everything downstream works in fractional seconds since midnight;
//! differences are taken on whole milliseconds.

use chrono::TimeDelta;

use crate::{Error, Result};

/// A parsed `HH:MM:SS.mmm` stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl TimeOfDay {
    /// Fractional seconds since midnight.
    pub fn seconds(&self) -> f64 {
        to_seconds(self.hour, self.minute, self.second, self.millisecond)
    }

    /// Offset from midnight as an exact millisecond span.
    pub fn since_midnight(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.hour))
            + TimeDelta::minutes(i64::from(self.minute))
            + TimeDelta::seconds(i64::from(self.second))
            + TimeDelta::milliseconds(i64::from(self.millisecond))
    }
}

/// `((h*60+m)*60+s) + ms/1000`.
pub fn to_seconds(hour: u32, minute: u32, second: u32, millisecond: u32) -> f64 {
    (f64::from(hour) * 60.0 + f64::from(minute)) * 60.0 + f64::from(second) + f64::from(millisecond) / 1000.0
}

/// Parse a `HH:MM:SS.mmm` string. Field ranges are not checked.
pub fn parse(text: &str) -> Result<TimeOfDay> {
    let caps = regex!(r"^(\d{2}):(\d{2}):(\d{2})\.(\d{3})$")
        .captures(text)
        .ok_or_else(|| Error::MalformedTime(text.to_string()))?;
    let field = |i: usize| caps[i].parse::<u32>().map_err(|_| Error::MalformedTime(text.to_string()));

    Ok(TimeOfDay { hour: field(1)?, minute: field(2)?, second: field(3)?, millisecond: field(4)? })
}

/// Signed `end - start` in seconds, exact to the millisecond.
pub fn delta(start: &str, end: &str) -> Result<f64> {
    let span = parse(end)?.since_midnight() - parse(start)?.since_midnight();
    Ok(span.num_milliseconds() as f64 / 1000.0)
}

/// Length of the intersection of two windows, if they overlap at all.
pub fn overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> Option<f64> {
    if a_start < b_end && b_start < a_end { Some(round_millis(a_end.min(b_end) - a_start.max(b_start))) } else { None }
}

fn round_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
