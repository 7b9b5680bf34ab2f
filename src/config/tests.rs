use super::validation::validate_config;
use super::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

const ALL_ENV_VARS: [&str; 12] = [
    ENV_LATITUDE,
    ENV_LONGITUDE,
    ENV_TIME_ZONE,
    ENV_CURRENT_WAKE_UP_TIME,
    ENV_NEXT_WAKE_UP_EARLIEST_TIME,
    ENV_NEXT_WAKE_UP_LATEST_TIME,
    ENV_BAD_SLEEP_MINUTES,
    ENV_WIND_DOWN_BEFORE_SLEEP_MINUTES,
    ENV_BREAKFAST_AFTER_WAKE_UP_MINUTES,
    ENV_DINNER_BEFORE_SLEEP_MINUTES,
    ENV_WORKING_HOURS,
    ENV_EXPORT_DIR,
];

/// Run `f` with exactly `vars` set among the configuration variables,
/// restoring the previous environment afterwards.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let saved: Vec<(&str, Option<String>)> = ALL_ENV_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    unsafe {
        for name in ALL_ENV_VARS {
            std::env::remove_var(name);
        }
        for (name, value) in vars {
            std::env::set_var(name, value);
        }
    }

    let result = f();

    unsafe {
        for (name, value) in saved {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }

    result
}

fn vienna_config() -> Config {
    Config {
        latitude: Some(48.2082),
        longitude: Some(16.3738),
        time_zone: Some("Europe/Vienna".to_string()),
        current_wake_up_time: Some("06:30".to_string()),
        ..Config::default()
    }
}

#[test]
fn test_config_validation_basic() {
    assert!(validate_config(&vienna_config()).is_ok());
    assert!(validate_config(&Config::default()).is_ok());
}

#[test]
fn test_config_validation_coordinates() {
    let mut config = vienna_config();
    config.latitude = Some(91.0);
    assert!(validate_config(&config).is_err());

    let mut config = vienna_config();
    config.longitude = Some(-180.5);
    assert!(validate_config(&config).is_err());

    let mut config = vienna_config();
    config.latitude = Some(-90.0);
    config.longitude = Some(180.0);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_validation_offsets() {
    let mut config = vienna_config();
    config.wind_down_before_sleep_minutes = Some(-5.0);
    let err = validate_config(&config).unwrap_err().to_string();
    assert!(err.contains("wind_down_before_sleep_minutes"));

    let mut config = vienna_config();
    config.dinner_before_sleep_minutes = Some(f64::NAN);
    assert!(validate_config(&config).is_err());

    let mut config = vienna_config();
    config.bad_sleep_minutes = Some(45.0);
    config.breakfast_after_wake_up_minutes = Some(0.0);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_validation_working_hours() {
    let mut config = vienna_config();
    config.working_hours = Some(24.5);
    assert!(validate_config(&config).is_err());

    config.working_hours = Some(0.0);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_validation_time_strings() {
    let mut config = vienna_config();
    config.current_wake_up_time = Some("6.30".to_string());
    assert!(validate_config(&config).is_err());

    let mut config = vienna_config();
    config.next_wake_up_earliest_time = Some("07:00".to_string());
    config.next_wake_up_latest_time = Some("06:00".to_string());
    let err = validate_config(&config).unwrap_err().to_string();
    assert!(err.contains("must not be after"));

    config.next_wake_up_latest_time = Some("07:00:00".to_string());
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_validation_time_zone() {
    let mut config = vienna_config();
    config.time_zone = Some("Mars/Olympus_Mons".to_string());
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_schedule_config_defaults() {
    let schedule = vienna_config().schedule_config().unwrap();
    assert_eq!(schedule.time_zone, chrono_tz::Europe::Vienna);
    assert_eq!(schedule.current_wake_up_time, "06:30");
    assert_eq!(schedule.bad_sleep_minutes, DEFAULT_BAD_SLEEP_MINUTES);
    assert_eq!(
        schedule.wind_down_before_sleep_minutes,
        DEFAULT_WIND_DOWN_BEFORE_SLEEP_MINUTES
    );
    assert_eq!(
        schedule.breakfast_after_wake_up_minutes,
        DEFAULT_BREAKFAST_AFTER_WAKE_UP_MINUTES
    );
    assert_eq!(
        schedule.dinner_before_sleep_minutes,
        DEFAULT_DINNER_BEFORE_SLEEP_MINUTES
    );
    assert_eq!(schedule.working_hours, DEFAULT_WORKING_HOURS);
    assert!(schedule.next_wake_up_earliest_time.is_none());
}

#[test]
fn test_schedule_config_requires_wake_up_time() {
    let mut config = vienna_config();
    config.current_wake_up_time = None;
    let err = config.schedule_config().unwrap_err().to_string();
    assert!(err.contains(ENV_CURRENT_WAKE_UP_TIME));
}

#[test]
fn test_missing_coordinates() {
    let config = Config::default();
    assert_eq!(config.coordinates(), Err(ScheduleError::MissingCoordinates));
    assert_eq!(
        config.resolve_time_zone(),
        Err(ScheduleError::MissingCoordinates)
    );
}

#[test]
fn test_time_zone_detected_from_coordinates() {
    let mut config = vienna_config();
    config.time_zone = None;
    assert_eq!(config.resolve_time_zone(), Ok(chrono_tz::Europe::Vienna));

    config.time_zone = Some("  ".to_string());
    assert_eq!(config.resolve_time_zone(), Ok(chrono_tz::Europe::Vienna));
}

#[test]
fn test_unknown_time_zone() {
    assert_eq!(
        parse_time_zone("Nowhere/Special"),
        Err(ScheduleError::UnknownTimeZone("Nowhere/Special".to_string()))
    );
    assert_eq!(parse_time_zone(" Asia/Tokyo "), Ok(chrono_tz::Asia::Tokyo));
}

#[test]
fn test_export_dir_default() {
    assert_eq!(Config::default().export_dir(), PathBuf::from("exports"));
    let config = Config {
        export_dir: Some("/tmp/cal".to_string()),
        ..Config::default()
    };
    assert_eq!(config.export_dir(), PathBuf::from("/tmp/cal"));
}

#[test]
#[serial]
fn test_env_overrides_file_values() {
    let mut config = vienna_config();
    config.working_hours = Some(6.0);

    with_env(
        &[
            (ENV_LATITUDE, "-33.8688"),
            (ENV_LONGITUDE, "151.2093"),
            (ENV_TIME_ZONE, "Australia/Sydney"),
            (ENV_NEXT_WAKE_UP_LATEST_TIME, "07:15"),
            (ENV_BAD_SLEEP_MINUTES, "30"),
            (ENV_EXPORT_DIR, "calendar"),
        ],
        || config.apply_env_overrides(),
    )
    .unwrap();

    assert_eq!(config.latitude, Some(-33.8688));
    assert_eq!(config.longitude, Some(151.2093));
    assert_eq!(config.time_zone.as_deref(), Some("Australia/Sydney"));
    assert_eq!(config.next_wake_up_latest_time.as_deref(), Some("07:15"));
    assert_eq!(config.bad_sleep_minutes, Some(30.0));
    assert_eq!(config.export_dir.as_deref(), Some("calendar"));
    // Untouched by the environment
    assert_eq!(config.current_wake_up_time.as_deref(), Some("06:30"));
    assert_eq!(config.working_hours, Some(6.0));
}

#[test]
#[serial]
fn test_empty_env_values_are_ignored() {
    let mut config = vienna_config();
    with_env(&[(ENV_LATITUDE, ""), (ENV_CURRENT_WAKE_UP_TIME, "  ")], || {
        config.apply_env_overrides()
    })
    .unwrap();
    assert_eq!(config, vienna_config());
}

#[test]
#[serial]
fn test_non_numeric_env_value() {
    let mut config = Config::default();
    let err = with_env(&[(ENV_WORKING_HOURS, "eight")], || {
        config.apply_env_overrides()
    })
    .unwrap_err();
    assert!(err.to_string().contains(ENV_WORKING_HOURS));
}

#[test]
#[serial]
fn test_load_from_path() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &config_path,
        r#"
latitude = 48.2082
longitude = 16.3738
time_zone = "Europe/Vienna"
current_wake_up_time = "06:30"
next_wake_up_earliest_time = "05:45"
dinner_before_sleep_minutes = 150
working_hours = 7.5
"#,
    )
    .unwrap();

    let config = with_env(&[], || load_from_path(&config_path)).unwrap();
    assert_eq!(config.latitude, Some(48.2082));
    assert_eq!(config.next_wake_up_earliest_time.as_deref(), Some("05:45"));
    assert_eq!(config.dinner_before_sleep_minutes, Some(150.0));
    assert_eq!(config.working_hours, Some(7.5));
    assert_eq!(config.source.as_ref(), Some(&config_path));
}

#[test]
#[serial]
fn test_load_from_path_rejects_invalid_values() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, "latitude = 120.0\nlongitude = 0.0\n").unwrap();
    assert!(with_env(&[], || load_from_path(&config_path)).is_err());
}

#[test]
#[serial]
fn test_load_from_path_rejects_unknown_keys() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, "night_temp = 3300\n").unwrap();
    let err = with_env(&[], || load_from_path(&config_path)).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config"));
}

#[test]
#[serial]
fn test_load_from_missing_path_uses_defaults() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let config = with_env(&[], || load_from_path(&missing)).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_load_from_path_applies_environment() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, "latitude = 48.2082\nlongitude = 16.3738\n").unwrap();

    let config = with_env(&[(ENV_LATITUDE, "47.0")], || load_from_path(&config_path)).unwrap();
    assert_eq!(config.latitude, Some(47.0));
    assert_eq!(config.longitude, Some(16.3738));
}

#[test]
#[serial]
fn test_load_without_file_uses_environment() {
    let temp_dir = tempdir().unwrap();
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = with_env(
        &[
            (ENV_LATITUDE, "40.7128"),
            (ENV_LONGITUDE, "-74.0060"),
            (ENV_CURRENT_WAKE_UP_TIME, "07:00"),
        ],
        Config::load,
    );

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    let config = result.unwrap();
    assert!(config.source.is_none());
    assert_eq!(config.coordinates(), Ok((40.7128, -74.0060)));
    assert_eq!(
        config.resolve_time_zone(),
        Ok(chrono_tz::America::New_York)
    );
}

#[test]
#[serial]
fn test_load_merges_file_and_environment() {
    let temp_dir = tempdir().unwrap();
    let config_dir = temp_dir.path().join(CONFIG_DIR_NAME);
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join(CONFIG_FILE_NAME),
        "latitude = 48.2082\nlongitude = 16.3738\ncurrent_wake_up_time = \"06:30\"\n",
    )
    .unwrap();

    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = with_env(&[(ENV_CURRENT_WAKE_UP_TIME, "05:50")], Config::load);

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    let config = result.unwrap();
    assert!(config.source.is_some());
    assert_eq!(config.latitude, Some(48.2082));
    assert_eq!(config.current_wake_up_time.as_deref(), Some("05:50"));
}

#[test]
#[serial]
fn test_load_rejects_invalid_environment() {
    let temp_dir = tempdir().unwrap();
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = with_env(
        &[(ENV_LATITUDE, "48.2"), (ENV_LONGITUDE, "16.3"), (ENV_WORKING_HOURS, "30")],
        Config::load,
    );

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    assert!(result.is_err());
}
