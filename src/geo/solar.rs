//! Solar event lookups for a date and location.
//!
//! The schedule pipeline only needs five instants per day: civil dawn, sunrise,
//! solar noon, sunset, and civil dusk. [`SolarTimeProvider`] is the seam the
//! pipeline depends on; [`SunriseProvider`] is the production implementation
//! backed by the `sunrise` crate.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::sync::OnceLock;
use sunrise::{Coordinates, DawnType, SolarDay, SolarEvent};
use tzf_rs::DefaultFinder;

use crate::error::{Result, ScheduleError};

/// The five solar instants of one calendar day, in UTC.
///
/// Holds `dawn <= sunrise <= solar_noon <= sunset <= dusk`; providers must
/// reject days where that ordering cannot be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTimes {
    pub date: NaiveDate,
    pub dawn: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub solar_noon: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub dusk: DateTime<Utc>,
}

impl SolarTimes {
    /// Build from raw instants, checking the ordering invariant.
    pub fn new(
        date: NaiveDate,
        dawn: DateTime<Utc>,
        sunrise: DateTime<Utc>,
        solar_noon: DateTime<Utc>,
        sunset: DateTime<Utc>,
        dusk: DateTime<Utc>,
    ) -> Result<Self> {
        if !(dawn <= sunrise && sunrise <= solar_noon && solar_noon <= sunset && sunset <= dusk) {
            return Err(ScheduleError::InvalidSolarOrder { date });
        }

        Ok(Self {
            date,
            dawn,
            sunrise,
            solar_noon,
            sunset,
            dusk,
        })
    }

    /// Sunset minus sunrise, in hours.
    pub fn day_length_hours(&self) -> f64 {
        hours_between(self.sunrise, self.sunset)
    }
}

/// Source of solar event times.
///
/// `date` is the solar day at `longitude`; callers planning a local calendar
/// day map it first (see [`solar_date_for_local_day`]).
#[cfg_attr(test, mockall::automock)]
pub trait SolarTimeProvider: Send + Sync {
    fn get_solar_times(&self, date: NaiveDate, latitude: f64, longitude: f64)
    -> Result<SolarTimes>;

    /// Sunset minus sunrise, in hours.
    ///
    /// Needs only the sun to rise and set, so it succeeds on days without
    /// civil dusk (high summer between roughly 60.5° and 65.7° latitude).
    fn get_day_length_hours(&self, date: NaiveDate, latitude: f64, longitude: f64)
    -> Result<f64>;
}

/// Astronomical calculations through the `sunrise` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunriseProvider;

impl SolarTimeProvider for SunriseProvider {
    fn get_solar_times(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<SolarTimes> {
        let coord = validate_coordinates(latitude, longitude)?;

        if !event_occurs(date, latitude, CIVIL_TWILIGHT_ALTITUDE) {
            return Err(ScheduleError::PolarDayOrNight {
                date,
                event: "civil twilight",
            });
        }

        let solar_day = SolarDay::new(coord, date);
        let (sunrise, sunset) = sunrise_and_sunset(&solar_day, date, latitude)?;
        let dawn = ensure_occurs(
            date,
            solar_day.event_time(SolarEvent::Dawn(DawnType::Civil)),
            "civil dawn",
        )?;
        let dusk = ensure_occurs(
            date,
            solar_day.event_time(SolarEvent::Dusk(DawnType::Civil)),
            "civil dusk",
        )?;

        // Transit sits halfway between sunrise and sunset
        let solar_noon = midpoint(sunrise, sunset);

        SolarTimes::new(date, dawn, sunrise, solar_noon, sunset, dusk)
    }

    fn get_day_length_hours(&self, date: NaiveDate, latitude: f64, longitude: f64) -> Result<f64> {
        let coord = validate_coordinates(latitude, longitude)?;
        let (sunrise, sunset) = sunrise_and_sunset(&SolarDay::new(coord, date), date, latitude)?;
        if sunset < sunrise {
            return Err(ScheduleError::InvalidSolarOrder { date });
        }
        Ok(hours_between(sunrise, sunset))
    }
}

fn sunrise_and_sunset(
    solar_day: &SolarDay,
    date: NaiveDate,
    latitude: f64,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    if !event_occurs(date, latitude, SUNRISE_ALTITUDE) {
        return Err(ScheduleError::PolarDayOrNight {
            date,
            event: "sunrise",
        });
    }

    let sunrise = ensure_occurs(date, solar_day.event_time(SolarEvent::Sunrise), "sunrise")?;
    let sunset = ensure_occurs(date, solar_day.event_time(SolarEvent::Sunset), "sunset")?;
    Ok((sunrise, sunset))
}

fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}

/// The solar day whose mean solar noon is closest to local noon of `date`.
///
/// `SolarDay` counts days at the observer's longitude. Zones far from solar
/// time (Pacific/Kiritimati is UTC+14 at 157°W) would otherwise get the
/// neighbouring day's events for their local date.
pub fn solar_date_for_local_day(date: NaiveDate, longitude: f64, tz: &Tz) -> NaiveDate {
    let Some(local_noon) = date.and_hms_opt(12, 0, 0) else {
        return date;
    };
    let Some(noon_utc) = tz.from_local_datetime(&local_noon).earliest() else {
        return date;
    };

    // Four minutes of mean solar time per degree of longitude
    let mean_solar = noon_utc.naive_utc() + Duration::seconds((longitude * 240.0).round() as i64);
    mean_solar.date()
}

/// Check coordinate ranges and convert them for the `sunrise` crate.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<Coordinates> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(ScheduleError::InvalidCoordinates {
            latitude,
            longitude,
        });
    }

    Coordinates::new(latitude, longitude).ok_or(ScheduleError::InvalidCoordinates {
        latitude,
        longitude,
    })
}

/// Apparent solar altitude at sunrise/sunset, refraction included.
const SUNRISE_ALTITUDE: f64 = -0.833;
/// Solar altitude bounding civil twilight.
const CIVIL_TWILIGHT_ALTITUDE: f64 = -6.0;

/// Whether the sun crosses `altitude` (degrees) on `date` at `latitude`.
///
/// Uses the NOAA declination series; the hour-angle cosine leaving [-1, 1]
/// means the sun stays entirely above or below that altitude all day.
pub fn event_occurs(date: NaiveDate, latitude: f64, altitude: f64) -> bool {
    let gamma = 2.0 * std::f64::consts::PI / 365.0 * (date.ordinal0() as f64 + 0.5);
    let declination = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin();

    let lat = latitude.to_radians();
    let cos_hour_angle = (altitude.to_radians().sin() - lat.sin() * declination.sin())
        / (lat.cos() * declination.cos());

    cos_hour_angle.is_finite() && (-1.0..=1.0).contains(&cos_hour_angle)
}

/// When an event never happens (polar day or night) the calculation degenerates
/// and produces an instant nowhere near the requested date. Any event further
/// than a day from the date's UTC span is treated as missing.
fn ensure_occurs(
    date: NaiveDate,
    time: DateTime<Utc>,
    event: &'static str,
) -> Result<DateTime<Utc>> {
    let day_start = date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    let Some(day_start) = day_start else {
        return Err(ScheduleError::PolarDayOrNight { date, event });
    };

    let earliest = day_start - Duration::days(1);
    let latest = day_start + Duration::days(2);
    if time < earliest || time >= latest {
        return Err(ScheduleError::PolarDayOrNight { date, event });
    }

    Ok(time)
}

/// Arithmetic mean of two instants at millisecond resolution.
pub fn midpoint(a: DateTime<Utc>, b: DateTime<Utc>) -> DateTime<Utc> {
    let millis = (a.timestamp_millis() + b.timestamp_millis()).div_euclid(2);
    DateTime::from_timestamp_millis(millis).unwrap_or(a)
}

/// Polygon index for timezone lookups, built on first use.
static TZ_FINDER: OnceLock<DefaultFinder> = OnceLock::new();

/// Look up the IANA timezone covering the given coordinates.
///
/// Falls back to UTC for coordinates outside any named zone (open ocean).
pub fn determine_timezone_from_coordinates(latitude: f64, longitude: f64) -> Tz {
    TZ_FINDER
        .get_or_init(DefaultFinder::new)
        .get_tz_name(longitude, latitude)
        .parse::<Tz>()
        .unwrap_or(Tz::UTC)
}
