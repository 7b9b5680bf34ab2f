//! Error type for the schedule pipeline.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Failures of solar lookups and schedule derivation.
///
/// Degenerate inputs that have a defined fallback (equal solstice day lengths,
/// an empty work span) are not errors; they are reported through flags on
/// [`crate::schedule::SleepEstimate`] and [`crate::schedule::WorkSplit`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("latitude and longitude are required")]
    MissingCoordinates,

    #[error("invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("malformed time '{input}': expected HH:MM or HH:MM:SS")]
    MalformedTimeString { input: String },

    #[error("local time {local} does not exist in timezone {time_zone}")]
    NonexistentLocalTime {
        local: NaiveDateTime,
        time_zone: String,
    },

    #[error("earliest wake-up time {earliest} is later than latest wake-up time {latest}")]
    ConflictingWakeBounds { earliest: String, latest: String },

    #[error("{event} does not occur on {date} at this latitude (polar day or night)")]
    PolarDayOrNight { date: NaiveDate, event: &'static str },

    #[error("solar events on {date} are out of order")]
    InvalidSolarOrder { date: NaiveDate },

    #[error("no calendar day follows {date}")]
    DateOutOfRange { date: NaiveDate },

    #[error("unknown timezone '{0}'")]
    UnknownTimeZone(String),
}

pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;
