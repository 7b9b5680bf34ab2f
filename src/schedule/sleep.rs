//! Seasonal sleep-duration model.
//!
//! Sleep need is interpolated linearly between the two solstices: the longest
//! day of the year maps to `SLEEP_LENGTH_HOURS - SEASONAL_ADJUSTMENT_HOURS`,
//! the shortest to `SLEEP_LENGTH_HOURS + SEASONAL_ADJUSTMENT_HOURS`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::constants::{
    DEGENERATE_DAY_LENGTH_EPSILON_HOURS, SEASONAL_ADJUSTMENT_HOURS, SLEEP_LENGTH_HOURS,
};
use crate::error::Result;
use crate::geo::SolarTimeProvider;

/// Result of the sleep estimate for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleepEstimate {
    /// Recommended sleep, in hours.
    pub hours: f64,
    /// Day length (sunset - sunrise) of the input date, in hours.
    pub day_length_hours: f64,
    /// Position of the day length between the shortest (0) and longest (1) solstice day.
    pub normalized_day_length: f64,
    /// Solstice day lengths were equal; `hours` is the baseline.
    pub degenerate_day_length: bool,
}

/// Estimate sleep need for `date` at the given location.
///
/// Probes the provider's day length for June 21 and December 21 of the date's
/// year and for the date itself; any provider failure is returned unchanged.
/// Only sunrise and sunset are needed, so a solstice without civil dusk does
/// not prevent an estimate.
pub fn estimate_sleep_hours<P>(
    provider: &P,
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
) -> Result<SleepEstimate>
where
    P: SolarTimeProvider + ?Sized,
{
    let (june_solstice, december_solstice) = solstices(date.year());

    let june = provider.get_day_length_hours(june_solstice, latitude, longitude)?;
    let december = provider.get_day_length_hours(december_solstice, latitude, longitude)?;
    let current = provider.get_day_length_hours(date, latitude, longitude)?;

    Ok(sleep_from_day_lengths(current, june, december))
}

/// Interpolate sleep hours from day lengths (all in hours).
///
/// The shorter solstice day anchors the upper end of the sleep range, so the
/// model behaves the same in both hemispheres.
pub fn sleep_from_day_lengths(current: f64, june: f64, december: f64) -> SleepEstimate {
    let shortest = june.min(december);
    let longest = june.max(december);
    let range = longest - shortest;

    if range.abs() < DEGENERATE_DAY_LENGTH_EPSILON_HOURS || !range.is_finite() {
        return SleepEstimate {
            hours: SLEEP_LENGTH_HOURS,
            day_length_hours: current,
            normalized_day_length: 0.5,
            degenerate_day_length: true,
        };
    }

    let normalized = ((current - shortest) / range).clamp(0.0, 1.0);

    let min_sleep = SLEEP_LENGTH_HOURS - SEASONAL_ADJUSTMENT_HOURS;
    let max_sleep = SLEEP_LENGTH_HOURS + SEASONAL_ADJUSTMENT_HOURS;

    SleepEstimate {
        hours: max_sleep - normalized * (max_sleep - min_sleep),
        day_length_hours: current,
        normalized_day_length: normalized,
        degenerate_day_length: false,
    }
}

fn solstices(year: i32) -> (NaiveDate, NaiveDate) {
    // Month 6 day 21 and month 12 day 21 exist in every year chrono supports
    let june = NaiveDate::from_ymd_opt(year, 6, 21).unwrap_or(NaiveDate::MIN);
    let december = NaiveDate::from_ymd_opt(year, 12, 21).unwrap_or(NaiveDate::MAX);
    (june, december)
}
