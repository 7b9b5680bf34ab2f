//! Configuration validation functionality.
//!
//! Rejects configurations the engine could only answer with nonsense: out of
//! range coordinates, negative offsets, unparseable times, and wake-up bounds
//! that contradict each other.

use anyhow::Result;

use super::{Config, parse_time_zone};
use crate::constants::*;
use crate::schedule::time_of_day::parse_time_of_day;

/// Validate the merged configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if let Some(name) = config.time_zone.as_deref() {
        parse_time_zone(name)?;
    }

    validate_offset("bad_sleep_minutes", config.bad_sleep_minutes)?;
    validate_offset(
        "wind_down_before_sleep_minutes",
        config.wind_down_before_sleep_minutes,
    )?;
    validate_offset(
        "breakfast_after_wake_up_minutes",
        config.breakfast_after_wake_up_minutes,
    )?;
    validate_offset(
        "dinner_before_sleep_minutes",
        config.dinner_before_sleep_minutes,
    )?;

    if let Some(hours) = config.working_hours
        && !(MINIMUM_WORKING_HOURS..=MAXIMUM_WORKING_HOURS).contains(&hours)
    {
        anyhow::bail!(
            "working_hours ({}) must be between {} and {} hours",
            hours,
            MINIMUM_WORKING_HOURS,
            MAXIMUM_WORKING_HOURS
        );
    }

    if let Some(wake) = config.current_wake_up_time.as_deref() {
        parse_time_of_day(wake)?;
    }

    let earliest = config
        .next_wake_up_earliest_time
        .as_deref()
        .map(parse_time_of_day)
        .transpose()?;
    let latest = config
        .next_wake_up_latest_time
        .as_deref()
        .map(parse_time_of_day)
        .transpose()?;

    if let (Some(e), Some(l)) = (earliest, latest)
        && e > l
    {
        anyhow::bail!(
            "next_wake_up_earliest_time ({}) must not be after next_wake_up_latest_time ({})",
            e.format("%H:%M:%S"),
            l.format("%H:%M:%S")
        );
    }

    Ok(())
}

fn validate_offset(name: &str, value: Option<f64>) -> Result<()> {
    if let Some(minutes) = value
        && !(0.0..=MAXIMUM_OFFSET_MINUTES).contains(&minutes)
    {
        anyhow::bail!(
            "{} ({}) must be between 0 and {} minutes",
            name,
            minutes,
            MAXIMUM_OFFSET_MINUTES
        );
    }
    Ok(())
}
