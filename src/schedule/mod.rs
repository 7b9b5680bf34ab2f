//! Circadian schedule derivation.
//!
//! Turns a day's solar events, the next day's solar events, an estimated sleep
//! need, and a handful of preferences into concrete instants for sleep, meals,
//! cognitive peaks, and work blocks.
//!
//! ## Module Structure
//!
//! - [`sleep`]: seasonal sleep-duration estimate anchored on the solstices
//! - [`constraints`]: the ordered clamp chain applied to the sleep window
//! - [`engine`]: the derivation pipeline producing a [`DerivedSchedule`]
//! - [`time_of_day`]: `HH:MM[:SS]` parsing and resolution against a date
//! - [`display`]: console output of a derived schedule
//!
//! Everything here is a pure function of its inputs; calling
//! [`derive_schedule`] twice with the same arguments yields identical results.

pub mod constraints;
pub mod display;
pub mod engine;
pub mod sleep;
pub mod time_of_day;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::constants::*;
use crate::geo::SolarTimes;

pub use constraints::{SleepConstraint, SleepWindow};
pub use display::log_schedule;
pub use engine::{derive_schedule, plan_day, split_working_hours};
pub use sleep::{SleepEstimate, estimate_sleep_hours, sleep_from_day_lengths};


/// Preferences driving one derivation.
///
/// Offsets are in minutes, `working_hours` in hours. Time-of-day strings are
/// `HH:MM` or `HH:MM:SS` and are interpreted in `time_zone`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    pub time_zone: Tz,
    pub current_wake_up_time: String,
    pub next_wake_up_earliest_time: Option<String>,
    pub next_wake_up_latest_time: Option<String>,
    pub bad_sleep_minutes: f64,
    pub wind_down_before_sleep_minutes: f64,
    pub breakfast_after_wake_up_minutes: f64,
    pub dinner_before_sleep_minutes: f64,
    pub working_hours: f64,
}

impl ScheduleConfig {
    /// Configuration with default offsets and no wake-up bounds.
    pub fn new(time_zone: Tz, current_wake_up_time: impl Into<String>) -> Self {
        Self {
            time_zone,
            current_wake_up_time: current_wake_up_time.into(),
            next_wake_up_earliest_time: None,
            next_wake_up_latest_time: None,
            bad_sleep_minutes: DEFAULT_BAD_SLEEP_MINUTES,
            wind_down_before_sleep_minutes: DEFAULT_WIND_DOWN_BEFORE_SLEEP_MINUTES,
            breakfast_after_wake_up_minutes: DEFAULT_BREAKFAST_AFTER_WAKE_UP_MINUTES,
            dinner_before_sleep_minutes: DEFAULT_DINNER_BEFORE_SLEEP_MINUTES,
            working_hours: DEFAULT_WORKING_HOURS,
        }
    }
}

/// How the working hours were divided between the two work windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkSplit {
    pub morning_hours: f64,
    pub afternoon_hours: f64,
    /// The combined span was empty and the hours were split evenly.
    pub degenerate_span: bool,
}

/// Every derived point of the day, as UTC instants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSchedule {
    pub wake_up_time: DateTime<Utc>,
    pub next_wake_up_time: DateTime<Utc>,
    pub sleep_start_time: DateTime<Utc>,
    pub wind_down_time: DateTime<Utc>,
    pub breakfast_time: DateTime<Utc>,
    pub mid_morning_snack_time: DateTime<Utc>,
    pub lunch_time: DateTime<Utc>,
    pub afternoon_snack_time: DateTime<Utc>,
    pub dinner_time: DateTime<Utc>,
    pub morning_peak: DateTime<Utc>,
    pub power_nap_time: DateTime<Utc>,
    pub afternoon_peak: DateTime<Utc>,
    pub morning_work_start: DateTime<Utc>,
    pub morning_work_end: DateTime<Utc>,
    pub afternoon_work_start: DateTime<Utc>,
    pub afternoon_work_end: DateTime<Utc>,

    /// Sleep hours times 60 plus the bad-sleep buffer.
    pub required_sleep_minutes: f64,
    /// Sleep-window constraints that moved the window, in application order.
    pub adjustments: Vec<SleepConstraint>,
    pub work_split: WorkSplit,
}

/// Everything computed for one day, as printed with `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPlan {
    pub today: SolarTimes,
    pub tomorrow: SolarTimes,
    pub estimate: SleepEstimate,
    pub schedule: DerivedSchedule,
}
