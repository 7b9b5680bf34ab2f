//! Console formatting for solar times.
//!
//! Instants stay in UTC everywhere else; this is one of the two places where
//! they are converted into the configured timezone (export is the other).

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::solar::SolarTimes;

/// Display format shared by all schedule output.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format an instant in the given timezone.
pub fn format_in_tz(time: DateTime<Utc>, tz: &Tz) -> String {
    time.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}

/// Log today's solar events and tomorrow's morning events.
pub fn log_solar_times(today: &SolarTimes, tomorrow: &SolarTimes, tz: &Tz) {
    log_block_start!("Solar times for {}", today.date);
    log_indented!("Dawn (civil): {}", format_in_tz(today.dawn, tz));
    log_indented!("     Sunrise: {}", format_in_tz(today.sunrise, tz));
    log_indented!("  Solar noon: {}", format_in_tz(today.solar_noon, tz));
    log_indented!("      Sunset: {}", format_in_tz(today.sunset, tz));
    log_indented!("Dusk (civil): {}", format_in_tz(today.dusk, tz));

    log_block_start!("Next day");
    log_indented!("Dawn (civil): {}", format_in_tz(tomorrow.dawn, tz));
    log_indented!("     Sunrise: {}", format_in_tz(tomorrow.sunrise, tz));
}

/// Log detailed solar information for `--debug` runs.
pub fn log_solar_debug_info(today: &SolarTimes, latitude: f64, longitude: f64, tz: &Tz) {
    let lat_dir = if latitude >= 0.0 { "N" } else { "S" };
    let lon_dir = if longitude >= 0.0 { "E" } else { "W" };
    let day_length = today.sunset - today.sunrise;
    let twilight_morning = today.sunrise - today.dawn;
    let twilight_evening = today.dusk - today.sunset;

    log_pipe!();
    log_debug!("Solar calculation details:");
    log_indented!(
        "     Coordinates: {:.4}°{}, {:.4}°{}",
        latitude.abs(),
        lat_dir,
        longitude.abs(),
        lon_dir
    );
    log_indented!("        Timezone: {}", tz);
    log_indented!("     Sunrise UTC: {}", today.sunrise.format("%H:%M"));
    log_indented!("      Sunset UTC: {}", today.sunset.format("%H:%M"));
    log_indented!(
        "      Day length: {} hours {} minutes",
        day_length.num_hours(),
        day_length.num_minutes() % 60
    );
    log_indented!(
        "Morning twilight: {} minutes",
        twilight_morning.num_minutes()
    );
    log_indented!(
        "Evening twilight: {} minutes",
        twilight_evening.num_minutes()
    );
}
