use chrono::{NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use circadian::ScheduleError;
use circadian::geo::solar::{determine_timezone_from_coordinates, event_occurs};
use circadian::geo::{SolarTimeProvider, SunriseProvider};
use proptest::prelude::*;

/// Generate valid latitude values
fn latitude_strategy() -> impl Strategy<Value = f64> {
    -90.0..=90.0
}

/// Generate valid longitude values
fn longitude_strategy() -> impl Strategy<Value = f64> {
    -180.0..=180.0
}

/// Any date in a recent leap year
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=366).prop_map(|ordinal| NaiveDate::from_yo_opt(2024, ordinal).unwrap())
}

/// Property tests for timezone detection functionality
mod timezone_detection_tests {
    use super::*;

    proptest! {
        /// Detection never panics, ocean coordinates fall back to UTC
        #[test]
        fn test_any_coordinates_yield_timezone(
            lat in latitude_strategy(),
            lon in longitude_strategy()
        ) {
            let _ = determine_timezone_from_coordinates(lat, lon);
        }

        /// Known cities resolve to their IANA zone
        #[test]
        fn test_major_cities_timezones(city_index in 0..8usize) {
            let cities = [
                (48.2082, 16.3738, "Europe/Vienna"),
                (40.7128, -74.0060, "America/New_York"),
                (51.5074, -0.1278, "Europe/London"),
                (35.6762, 139.6503, "Asia/Tokyo"),
                (-33.8688, 151.2093, "Australia/Sydney"),
                (34.0522, -118.2437, "America/Los_Angeles"),
                (28.6139, 77.2090, "Asia/Kolkata"),
                (-23.5505, -46.6333, "America/Sao_Paulo"),
            ];

            let (lat, lon, expected_tz_str) = cities[city_index];
            let expected = expected_tz_str.parse::<Tz>().unwrap();
            prop_assert_eq!(determine_timezone_from_coordinates(lat, lon), expected);
        }

        /// Detected zones have real-world UTC offsets (-12 to +14 hours)
        #[test]
        fn test_timezone_offset_bounds(
            lat in -60.0..70.0f64,
            lon in longitude_strategy()
        ) {
            let tz = determine_timezone_from_coordinates(lat, lon);
            let instant = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
            let offset_hours =
                tz.offset_from_utc_datetime(&instant.naive_utc()).fix().local_minus_utc() as f64
                    / 3600.0;

            prop_assert!(
                (-12.0..=14.0).contains(&offset_hours),
                "Unreasonable offset {} hours at ({}, {})", offset_hours, lat, lon
            );
        }
    }
}

/// Property tests for the sunrise-backed provider
mod solar_provider_tests {
    use super::*;

    proptest! {
        /// Well outside the polar circles every day has a full, ordered set of events
        #[test]
        fn test_events_ordered_outside_polar_regions(
            lat in -55.0..55.0f64,
            lon in longitude_strategy(),
            date in date_strategy()
        ) {
            let times = SunriseProvider.get_solar_times(date, lat, lon).unwrap();

            prop_assert!(times.dawn <= times.sunrise);
            prop_assert!(times.sunrise <= times.solar_noon);
            prop_assert!(times.solar_noon <= times.sunset);
            prop_assert!(times.sunset <= times.dusk);
            prop_assert!(times.day_length_hours() > 0.0 && times.day_length_hours() < 24.0);
        }

        /// Near the poles the provider either succeeds with ordered events or
        /// reports polar day/night; it never returns garbage instants
        #[test]
        fn test_polar_regions_fail_cleanly(
            lat in prop_oneof![66.0..89.0f64, -89.0..-66.0f64],
            lon in longitude_strategy(),
            date in date_strategy()
        ) {
            match SunriseProvider.get_solar_times(date, lat, lon) {
                Ok(times) => {
                    prop_assert!(times.dawn <= times.dusk);
                    prop_assert!((times.dusk - times.dawn).num_hours() <= 24);
                }
                Err(ScheduleError::PolarDayOrNight { .. })
                | Err(ScheduleError::InvalidSolarOrder { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }

        /// The civil-twilight crossing exists whenever sunrise does
        #[test]
        fn test_twilight_exists_when_sunrise_does(
            lat in latitude_strategy(),
            date in date_strategy()
        ) {
            if event_occurs(date, lat, -0.833) {
                prop_assert!(event_occurs(date, lat, -6.0) || lat.abs() > 60.0);
            }
        }

        /// Out-of-range coordinates are rejected
        #[test]
        fn test_invalid_coordinates_rejected(
            lat in prop_oneof![90.001..1000.0f64, -1000.0..-90.001f64],
            lon in longitude_strategy()
        ) {
            let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
            let is_invalid = matches!(
                SunriseProvider.get_solar_times(date, lat, lon),
                Err(ScheduleError::InvalidCoordinates { .. })
            );
            prop_assert!(is_invalid);
        }
    }
}
