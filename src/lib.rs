//! # Circadian Library
//!
//! Internal library for the circadian binary application.
//!
//! This library exists to enable testing of the schedule pipeline and provide
//! clean separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Geographic**: `geo` computes civil dawn, sunrise, solar noon, sunset
//!   and civil dusk behind the `SolarTimeProvider` trait
//! - **Schedule**: `schedule` estimates sleep need from day length and derives
//!   sleep, meal, peak and work times from the solar events
//! - **Export**: `export` turns a derived schedule into an iCalendar file
//! - **Configuration**: `config` for TOML settings with environment overrides
//! - **Infrastructure**: argument parsing, logging, and the time source

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod geo;
pub mod schedule;
pub mod time_source;

pub use error::ScheduleError;
