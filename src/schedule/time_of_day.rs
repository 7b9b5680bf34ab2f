//! Time-of-day strings (`HH:MM` or `HH:MM:SS`) and their resolution to instants.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ScheduleError};

static TIME_OF_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("time-of-day pattern is valid")
});

/// Parse `HH:MM[:SS]`; seconds default to zero.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime> {
    let malformed = || ScheduleError::MalformedTimeString {
        input: input.to_string(),
    };

    let caps = TIME_OF_DAY.captures(input.trim()).ok_or_else(malformed)?;
    let field = |idx: usize| -> Result<u32> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().map_err(|_| malformed()),
            None => Ok(0),
        }
    };

    NaiveTime::from_hms_opt(field(1)?, field(2)?, field(3)?).ok_or_else(malformed)
}

/// Place a wall-clock time on `date` in `tz` and return the instant.
///
/// On a DST fold the earlier of the two instants is used; a time inside a DST
/// gap does not exist and is an error.
pub fn resolve_time_of_day(date: NaiveDate, time: NaiveTime, tz: &Tz) -> Result<DateTime<Utc>> {
    let local = date.and_time(time);
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ScheduleError::NonexistentLocalTime {
            local,
            time_zone: tz.to_string(),
        })
}

/// Parse and resolve in one step.
pub fn instant_from_time_string(date: NaiveDate, input: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    resolve_time_of_day(date, parse_time_of_day(input)?, tz)
}
