//! Derivation of the full daily schedule.
//!
//! The derivation is a chain of small immutable records, each built only
//! from the inputs and the records before it:
//!
//! 1. wake-up instant and sleep window (after the constraint chain)
//! 2. [`MealTimes`]
//! 3. [`PeakTimes`]
//! 4. [`WorkWindows`]
//!
//! and is flattened into a [`DerivedSchedule`] at the end.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::constraints::{SleepWindow, apply_constraints, sleep_constraints};
use super::time_of_day::{instant_from_time_string, parse_time_of_day, resolve_time_of_day};
use super::sleep::estimate_sleep_hours;
use super::{DailyPlan, DerivedSchedule, ScheduleConfig, WorkSplit};
use crate::constants::POWER_NAP_AFTER_LUNCH_MINUTES;
use crate::error::{Result, ScheduleError};
use crate::geo::{SolarTimeProvider, SolarTimes};
use crate::geo::solar::{midpoint, solar_date_for_local_day};

/// Fractional minutes as a duration, rounded to the millisecond.
pub(crate) fn minutes(value: f64) -> Duration {
    Duration::milliseconds((value * 60_000.0).round() as i64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MealTimes {
    breakfast: DateTime<Utc>,
    mid_morning_snack: DateTime<Utc>,
    lunch: DateTime<Utc>,
    afternoon_snack: DateTime<Utc>,
    dinner: DateTime<Utc>,
}

impl MealTimes {
    fn derive(
        wake_up: DateTime<Utc>,
        sleep_start: DateTime<Utc>,
        solar_noon: DateTime<Utc>,
        config: &ScheduleConfig,
    ) -> Self {
        let breakfast = wake_up + minutes(config.breakfast_after_wake_up_minutes);
        let dinner = sleep_start - minutes(config.dinner_before_sleep_minutes);
        // Pulled toward solar noon while staying between the two main meals
        let lunch = midpoint(solar_noon, midpoint(breakfast, dinner));

        Self {
            breakfast,
            mid_morning_snack: midpoint(breakfast, lunch),
            lunch,
            afternoon_snack: midpoint(lunch, dinner),
            dinner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PeakTimes {
    morning: DateTime<Utc>,
    power_nap: DateTime<Utc>,
    afternoon: DateTime<Utc>,
}

impl PeakTimes {
    fn derive(wake_up: DateTime<Utc>, lunch: DateTime<Utc>, wind_down: DateTime<Utc>) -> Self {
        let power_nap = lunch + Duration::minutes(POWER_NAP_AFTER_LUNCH_MINUTES);
        Self {
            morning: midpoint(wake_up, power_nap),
            power_nap,
            afternoon: midpoint(power_nap, wind_down),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct WorkWindows {
    split: WorkSplit,
    morning_start: DateTime<Utc>,
    morning_end: DateTime<Utc>,
    afternoon_start: DateTime<Utc>,
    afternoon_end: DateTime<Utc>,
}

impl WorkWindows {
    fn derive(
        wake_up: DateTime<Utc>,
        wind_down: DateTime<Utc>,
        peaks: &PeakTimes,
        working_hours: f64,
    ) -> Self {
        let split = split_working_hours(
            (peaks.power_nap - wake_up).num_milliseconds() as f64,
            (wind_down - peaks.power_nap).num_milliseconds() as f64,
            working_hours,
        );

        let morning_half = minutes(split.morning_hours / 2.0 * 60.0);
        let afternoon_half = minutes(split.afternoon_hours / 2.0 * 60.0);

        Self {
            split,
            morning_start: peaks.morning - morning_half,
            morning_end: peaks.morning + morning_half,
            afternoon_start: peaks.afternoon - afternoon_half,
            afternoon_end: peaks.afternoon + afternoon_half,
        }
    }
}

/// Divide `working_hours` between morning and afternoon in proportion to the
/// available spans. A non-positive combined span falls back to an even split.
pub fn split_working_hours(morning_span: f64, afternoon_span: f64, working_hours: f64) -> WorkSplit {
    let total = morning_span + afternoon_span;
    if total <= 0.0 || !total.is_finite() {
        return WorkSplit {
            morning_hours: working_hours / 2.0,
            afternoon_hours: working_hours / 2.0,
            degenerate_span: true,
        };
    }

    let morning_hours = working_hours * morning_span / total;
    WorkSplit {
        morning_hours,
        afternoon_hours: working_hours - morning_hours,
        degenerate_span: false,
    }
}

/// Derive the schedule for `today.date`.
///
/// `current_wake_up_time` is placed on `today.date` and the wake-up bounds on
/// `tomorrow.date`, all in `config.time_zone`. Fails on malformed or
/// nonexistent times and on contradictory wake-up bounds.
pub fn derive_schedule(
    today: &SolarTimes,
    tomorrow: &SolarTimes,
    sleep_hours: f64,
    config: &ScheduleConfig,
) -> Result<DerivedSchedule> {
    let tz = &config.time_zone;

    let wake_up_time = instant_from_time_string(today.date, &config.current_wake_up_time, tz)?;
    let (earliest_wake, latest_wake) = resolve_wake_bounds(tomorrow, config)?;

    let required_sleep_minutes = sleep_hours * 60.0 + config.bad_sleep_minutes;
    let required = minutes(required_sleep_minutes);

    let provisional = SleepWindow::ending_at(tomorrow.dawn, required);
    let constraints = sleep_constraints(today.dusk, earliest_wake, latest_wake);
    let (window, adjustments) = apply_constraints(provisional, &constraints, required);

    let wind_down_time = window.sleep_start - minutes(config.wind_down_before_sleep_minutes);
    let meals = MealTimes::derive(wake_up_time, window.sleep_start, today.solar_noon, config);
    let peaks = PeakTimes::derive(wake_up_time, meals.lunch, wind_down_time);
    let work = WorkWindows::derive(wake_up_time, wind_down_time, &peaks, config.working_hours);

    Ok(DerivedSchedule {
        wake_up_time,
        next_wake_up_time: window.next_wake_up,
        sleep_start_time: window.sleep_start,
        wind_down_time,
        breakfast_time: meals.breakfast,
        mid_morning_snack_time: meals.mid_morning_snack,
        lunch_time: meals.lunch,
        afternoon_snack_time: meals.afternoon_snack,
        dinner_time: meals.dinner,
        morning_peak: peaks.morning,
        power_nap_time: peaks.power_nap,
        afternoon_peak: peaks.afternoon,
        morning_work_start: work.morning_start,
        morning_work_end: work.morning_end,
        afternoon_work_start: work.afternoon_start,
        afternoon_work_end: work.afternoon_end,
        required_sleep_minutes,
        adjustments,
        work_split: work.split,
    })
}

/// Run the whole pipeline for `date`: solar times for the day and the next,
/// the sleep estimate, and the derived schedule.
pub fn plan_day<P>(
    provider: &P,
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    config: &ScheduleConfig,
) -> Result<DailyPlan>
where
    P: SolarTimeProvider + ?Sized,
{
    let next_date = date
        .succ_opt()
        .ok_or(ScheduleError::DateOutOfRange { date })?;

    let tz = &config.time_zone;
    let solar_today = solar_date_for_local_day(date, longitude, tz);
    let solar_tomorrow = solar_date_for_local_day(next_date, longitude, tz);

    // Records carry the local date so wake times resolve against it
    let today = SolarTimes {
        date,
        ..provider.get_solar_times(solar_today, latitude, longitude)?
    };
    let tomorrow = SolarTimes {
        date: next_date,
        ..provider.get_solar_times(solar_tomorrow, latitude, longitude)?
    };
    let estimate = estimate_sleep_hours(provider, solar_today, latitude, longitude)?;
    let schedule = derive_schedule(&today, &tomorrow, estimate.hours, config)?;

    Ok(DailyPlan {
        today,
        tomorrow,
        estimate,
        schedule,
    })
}

fn resolve_wake_bounds(
    tomorrow: &SolarTimes,
    config: &ScheduleConfig,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    let tz = &config.time_zone;
    let resolve = |bound: Option<&String>| -> Result<Option<DateTime<Utc>>> {
        bound
            .map(|s| resolve_time_of_day(tomorrow.date, parse_time_of_day(s)?, tz))
            .transpose()
    };

    let earliest = resolve(config.next_wake_up_earliest_time.as_ref())?;
    let latest = resolve(config.next_wake_up_latest_time.as_ref())?;

    if let (Some(e), Some(l)) = (earliest, latest)
        && e > l
    {
        return Err(ScheduleError::ConflictingWakeBounds {
            earliest: config
                .next_wake_up_earliest_time
                .clone()
                .unwrap_or_default(),
            latest: config.next_wake_up_latest_time.clone().unwrap_or_default(),
        });
    }

    Ok((earliest, latest))
}
