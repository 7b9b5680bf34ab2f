//! Geographic solar calculations.
//!
//! ## Module Structure
//!
//! - [`solar`]: the [`SolarTimeProvider`] seam, the `sunrise`-backed provider,
//!   coordinate validation, and timezone detection from coordinates
//! - [`display`]: console formatting of solar events in the configured timezone

pub mod display;
pub mod solar;

pub use display::{format_in_tz, log_solar_debug_info, log_solar_times};
pub use solar::{
    SolarTimeProvider, SolarTimes, SunriseProvider, determine_timezone_from_coordinates,
    solar_date_for_local_day,
};
