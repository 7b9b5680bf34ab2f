//! Defaults and limits shared across the application.

// # Sleep model

/// Baseline nightly sleep, in hours.
pub const SLEEP_LENGTH_HOURS: f64 = 8.0;
/// Maximum seasonal deviation from the baseline, in hours.
pub const SEASONAL_ADJUSTMENT_HOURS: f64 = 0.5;
/// Solstice day lengths closer than this (hours) count as equal.
pub const DEGENERATE_DAY_LENGTH_EPSILON_HOURS: f64 = 1.0 / 60.0;

// # Schedule defaults

pub const DEFAULT_BAD_SLEEP_MINUTES: f64 = 0.0;
pub const DEFAULT_WIND_DOWN_BEFORE_SLEEP_MINUTES: f64 = 60.0;
pub const DEFAULT_BREAKFAST_AFTER_WAKE_UP_MINUTES: f64 = 45.0;
pub const DEFAULT_DINNER_BEFORE_SLEEP_MINUTES: f64 = 180.0;
pub const DEFAULT_WORKING_HOURS: f64 = 8.0;

/// Power nap offset after lunch, in minutes.
pub const POWER_NAP_AFTER_LUNCH_MINUTES: i64 = 30;

// # Validation limits

pub const MAXIMUM_OFFSET_MINUTES: f64 = 24.0 * 60.0;
pub const MINIMUM_WORKING_HOURS: f64 = 0.0;
pub const MAXIMUM_WORKING_HOURS: f64 = 24.0;

// # Calendar export

pub const DEFAULT_EXPORT_DIR: &str = "exports";
pub const MEAL_EVENT_MINUTES: i64 = 30;
pub const LUNCH_EVENT_MINUTES: i64 = 60;
pub const PEAK_HOUR_MINUTES: i64 = 60;
pub const MEAL_REMINDER_MINUTES: i64 = 30;
pub const DINNER_REMINDER_TEXT: &str = "Stop the work and relax!";

// # Configuration sources

pub const CONFIG_FILE_NAME: &str = "circadian.toml";
pub const CONFIG_DIR_NAME: &str = "circadian";

pub const ENV_LATITUDE: &str = "LATITUDE";
pub const ENV_LONGITUDE: &str = "LONGITUDE";
pub const ENV_TIME_ZONE: &str = "TIME_ZONE";
pub const ENV_CURRENT_WAKE_UP_TIME: &str = "CURRENT_WAKE_UP_TIME";
pub const ENV_NEXT_WAKE_UP_EARLIEST_TIME: &str = "NEXT_WAKE_UP_EARLIEST_TIME";
pub const ENV_NEXT_WAKE_UP_LATEST_TIME: &str = "NEXT_WAKE_UP_LATEST_TIME";
pub const ENV_BAD_SLEEP_MINUTES: &str = "BAD_SLEEP_MINUTES";
pub const ENV_WIND_DOWN_BEFORE_SLEEP_MINUTES: &str = "WIND_DOWN_BEFORE_SLEEP_MINUTES";
pub const ENV_BREAKFAST_AFTER_WAKE_UP_MINUTES: &str = "BREAKFAST_AFTER_WAKE_UP_MINUTES";
pub const ENV_DINNER_BEFORE_SLEEP_MINUTES: &str = "DINNER_BEFORE_SLEEP_MINUTES";
pub const ENV_WORKING_HOURS: &str = "WORKING_HOURS";
pub const ENV_EXPORT_DIR: &str = "EXPORT_DIR";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
