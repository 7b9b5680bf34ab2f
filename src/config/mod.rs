//! Configuration for circadian: location, timezone, and schedule preferences.
//!
//! ## Configuration Sources
//!
//! Values are merged from two layers, later layers winning:
//! 1. `circadian.toml` in `$XDG_CONFIG_HOME/circadian/` (or the directory given
//!    with `--config`). The file is optional.
//! 2. Environment variables (`LATITUDE`, `LONGITUDE`, `TIME_ZONE`,
//!    `CURRENT_WAKE_UP_TIME`, ...). Empty variables are ignored.
//!
//! ```toml
//! #[Location]
//! latitude = 48.2082                      # Geographic latitude (-90 to +90)
//! longitude = 16.3738                     # Geographic longitude (-180 to +180)
//! time_zone = "Europe/Vienna"             # IANA name, detected from coordinates if absent
//!
//! #[Sleep]
//! current_wake_up_time = "06:30"          # Today's wake-up time (HH:MM[:SS])
//! next_wake_up_earliest_time = "05:30"    # Optional bound for tomorrow's wake-up
//! next_wake_up_latest_time = "07:00"      # Optional bound for tomorrow's wake-up
//! bad_sleep_minutes = 0                   # Extra sleep added to tonight's requirement
//! wind_down_before_sleep_minutes = 60
//!
//! #[Meals and work]
//! breakfast_after_wake_up_minutes = 45
//! dinner_before_sleep_minutes = 180
//! working_hours = 8
//!
//! #[Export]
//! export_dir = "exports"                  # Where the .ics file is written
//! ```
//!
//! The merged configuration is validated once; [`Config::schedule_config`]
//! then turns it into the immutable [`ScheduleConfig`] used by the engine.

pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::*;
use crate::error::ScheduleError;
use crate::geo::determine_timezone_from_coordinates;
use crate::schedule::ScheduleConfig;

pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

#[cfg(test)]
mod tests;

/// Raw configuration as read from `circadian.toml` and the environment.
///
/// Every field is optional here; defaults are applied when the
/// [`ScheduleConfig`] is built.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// IANA timezone for interpreting and displaying times
    pub time_zone: Option<String>,
    pub current_wake_up_time: Option<String>,
    pub next_wake_up_earliest_time: Option<String>,
    pub next_wake_up_latest_time: Option<String>,
    pub bad_sleep_minutes: Option<f64>,
    pub wind_down_before_sleep_minutes: Option<f64>,
    pub breakfast_after_wake_up_minutes: Option<f64>,
    pub dinner_before_sleep_minutes: Option<f64>,
    pub working_hours: Option<f64>,
    pub export_dir: Option<String>,

    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load configuration using automatic path detection.
    pub fn load() -> Result<Self> {
        loading::load()
    }

    /// Overlay non-empty environment variables onto this configuration.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(v) = env_parsed(ENV_LATITUDE)? {
            self.latitude = Some(v);
        }
        if let Some(v) = env_parsed(ENV_LONGITUDE)? {
            self.longitude = Some(v);
        }
        if let Some(v) = env_string(ENV_TIME_ZONE) {
            self.time_zone = Some(v);
        }
        if let Some(v) = env_string(ENV_CURRENT_WAKE_UP_TIME) {
            self.current_wake_up_time = Some(v);
        }
        if let Some(v) = env_string(ENV_NEXT_WAKE_UP_EARLIEST_TIME) {
            self.next_wake_up_earliest_time = Some(v);
        }
        if let Some(v) = env_string(ENV_NEXT_WAKE_UP_LATEST_TIME) {
            self.next_wake_up_latest_time = Some(v);
        }
        if let Some(v) = env_parsed(ENV_BAD_SLEEP_MINUTES)? {
            self.bad_sleep_minutes = Some(v);
        }
        if let Some(v) = env_parsed(ENV_WIND_DOWN_BEFORE_SLEEP_MINUTES)? {
            self.wind_down_before_sleep_minutes = Some(v);
        }
        if let Some(v) = env_parsed(ENV_BREAKFAST_AFTER_WAKE_UP_MINUTES)? {
            self.breakfast_after_wake_up_minutes = Some(v);
        }
        if let Some(v) = env_parsed(ENV_DINNER_BEFORE_SLEEP_MINUTES)? {
            self.dinner_before_sleep_minutes = Some(v);
        }
        if let Some(v) = env_parsed(ENV_WORKING_HOURS)? {
            self.working_hours = Some(v);
        }
        if let Some(v) = env_string(ENV_EXPORT_DIR) {
            self.export_dir = Some(v);
        }
        Ok(())
    }

    /// Latitude and longitude, both required.
    pub fn coordinates(&self) -> Result<(f64, f64), ScheduleError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(ScheduleError::MissingCoordinates),
        }
    }

    /// The configured timezone, or the one detected from the coordinates.
    pub fn resolve_time_zone(&self) -> Result<Tz, ScheduleError> {
        match self.time_zone.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => parse_time_zone(name),
            _ => {
                let (lat, lon) = self.coordinates()?;
                Ok(determine_timezone_from_coordinates(lat, lon))
            }
        }
    }

    /// Build the engine configuration, applying defaults for unset offsets.
    pub fn schedule_config(&self) -> Result<ScheduleConfig> {
        let current_wake_up_time = self.current_wake_up_time.clone().with_context(|| {
            format!("{ENV_CURRENT_WAKE_UP_TIME} (current_wake_up_time) must be set")
        })?;
        let time_zone = self.resolve_time_zone()?;

        Ok(ScheduleConfig {
            time_zone,
            current_wake_up_time,
            next_wake_up_earliest_time: self.next_wake_up_earliest_time.clone(),
            next_wake_up_latest_time: self.next_wake_up_latest_time.clone(),
            bad_sleep_minutes: self.bad_sleep_minutes.unwrap_or(DEFAULT_BAD_SLEEP_MINUTES),
            wind_down_before_sleep_minutes: self
                .wind_down_before_sleep_minutes
                .unwrap_or(DEFAULT_WIND_DOWN_BEFORE_SLEEP_MINUTES),
            breakfast_after_wake_up_minutes: self
                .breakfast_after_wake_up_minutes
                .unwrap_or(DEFAULT_BREAKFAST_AFTER_WAKE_UP_MINUTES),
            dinner_before_sleep_minutes: self
                .dinner_before_sleep_minutes
                .unwrap_or(DEFAULT_DINNER_BEFORE_SLEEP_MINUTES),
            working_hours: self.working_hours.unwrap_or(DEFAULT_WORKING_HOURS),
        })
    }

    /// Directory for calendar exports.
    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(self.export_dir.as_deref().unwrap_or(DEFAULT_EXPORT_DIR))
    }

    /// Log the effective configuration.
    pub fn log_config(&self, schedule: &ScheduleConfig) {
        match &self.source {
            Some(path) => log_block_start!("Loaded configuration from {}", path.display()),
            None => log_block_start!("Loaded configuration from environment"),
        }

        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            let ns = if lat >= 0.0 { "N" } else { "S" };
            let ew = if lon >= 0.0 { "E" } else { "W" };
            log_indented!("Location: {:.4}°{ns}, {:.4}°{ew}", lat.abs(), lon.abs());
        }

        let tz_origin = if self.time_zone.is_some() {
            "configured"
        } else {
            "detected"
        };
        log_indented!("Time zone: {} ({tz_origin})", schedule.time_zone);
        log_indented!("Wake-up time: {}", schedule.current_wake_up_time);

        match (
            &schedule.next_wake_up_earliest_time,
            &schedule.next_wake_up_latest_time,
        ) {
            (Some(e), Some(l)) => log_indented!("Next wake-up between {e} and {l}"),
            (Some(e), None) => log_indented!("Next wake-up not before {e}"),
            (None, Some(l)) => log_indented!("Next wake-up not after {l}"),
            (None, None) => {}
        }

        log_indented!(
            "Wind down: {} min, breakfast after: {} min, dinner before sleep: {} min",
            schedule.wind_down_before_sleep_minutes,
            schedule.breakfast_after_wake_up_minutes,
            schedule.dinner_before_sleep_minutes
        );
    }
}

/// Parse an IANA timezone name.
pub fn parse_time_zone(name: &str) -> Result<Tz, ScheduleError> {
    Tz::from_str(name.trim()).map_err(|_| ScheduleError::UnknownTimeZone(name.to_string()))
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parsed<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_string(name)
        .map(|v| {
            v.parse::<T>()
                .with_context(|| format!("{name} must be a number (got '{v}')"))
        })
        .transpose()
}
