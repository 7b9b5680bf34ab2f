//! Time source abstraction for real and pinned clocks.
//!
//! "Today" is decided by reading the current time once at startup. Running
//! with `--date` replaces the real clock with a fixed one, so the whole
//! run (schedule and export timestamps) behaves as if it were that day.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting the current time
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reports the same instant
pub struct FixedTimeSource {
    instant: DateTime<Utc>,
}

impl FixedTimeSource {
    /// Noon of `date` in `tz`, which falls on `date` in that timezone
    /// regardless of DST.
    pub fn at_local_noon(date: NaiveDate, tz: &Tz) -> Self {
        let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
        let instant = tz
            .from_local_datetime(&noon)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| noon.and_utc());
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Utc> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Today's date in `tz` according to the global time source
pub fn today_in(tz: &Tz) -> NaiveDate {
    now().with_timezone(tz).date_naive()
}

/// Parse a date in the format "YYYY-MM-DD"
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date format: {e}. Use YYYY-MM-DD"))
}
