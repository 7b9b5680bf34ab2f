//! Main application entry point and high-level flow coordination.
//!
//! This module orchestrates one run after command-line argument parsing is
//! complete. It coordinates between the library modules:
//!
//! - `args`: Command-line argument parsing and help/version display
//! - `config`: Configuration loading, environment overrides and validation
//! - `time_source`: Deciding which day is "today"
//! - `schedule`: Solar lookups, sleep estimate and schedule derivation
//! - `export`: Writing the day's calendar file
//! - `logger`: Centralized logging functionality
//!
//! The flow is managed through the `ApplicationRunner` builder:
//! 1. Argument parsing and early exit for help/version
//! 2. Configuration loading and timezone resolution
//! 3. Time source setup (real clock, or a fixed one for `--date`)
//! 4. Schedule derivation for the day
//! 5. Console or JSON output, then the optional calendar export

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;

use circadian::args::{self, CliAction, ParsedArgs};
use circadian::config::{self, Config};
use circadian::constants::EXIT_FAILURE;
use circadian::export::{calendar_events, write_ics};
use circadian::geo::{SunriseProvider, log_solar_debug_info, log_solar_times};
use circadian::logger::Log;
use circadian::schedule::{log_schedule, plan_day};
use circadian::time_source::{self, FixedTimeSource, RealTimeSource, TimeSource};
use circadian::{
    log_block_start, log_debug, log_end, log_error_exit, log_indented, log_pipe, log_version,
};

/// Builder for configuring and running one schedule derivation.
///
/// # Examples
///
/// ```ignore
/// // Plan today and write the calendar file
/// ApplicationRunner::new(debug_enabled).run()?;
///
/// // Plan a fixed date, print JSON, skip the export
/// ApplicationRunner::new(false)
///     .with_date(Some(date))
///     .json_output(true)
///     .without_export()
///     .run()?;
/// ```
pub struct ApplicationRunner {
    debug_enabled: bool,
    date: Option<NaiveDate>,
    export_dir: Option<PathBuf>,
    export: bool,
    json: bool,
}

impl ApplicationRunner {
    /// Create a new runner with defaults matching a normal run
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            date: None,
            export_dir: None,
            export: true,
            json: false,
        }
    }

    /// Plan for `date` instead of today
    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    /// Override the configured export directory
    pub fn with_export_dir(mut self, dir: Option<String>) -> Self {
        self.export_dir = dir.map(PathBuf::from);
        self
    }

    pub fn without_export(mut self) -> Self {
        self.export = false;
        self
    }

    /// Print the plan as JSON instead of the decorated log
    pub fn json_output(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Execute the run
    pub fn run(self) -> Result<()> {
        if self.json {
            Log::set_enabled(false);
        }

        log_version!();
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled - showing solar details and sleep window adjustments");
        }

        let config = Config::load()?;
        let schedule_config = config.schedule_config()?;
        let (latitude, longitude) = config.coordinates()?;
        let tz = schedule_config.time_zone;

        let source: Arc<dyn TimeSource> = match self.date {
            Some(date) => Arc::new(FixedTimeSource::at_local_noon(date, &tz)),
            None => Arc::new(RealTimeSource),
        };
        time_source::init_time_source(source);
        let date = time_source::today_in(&tz);

        config.log_config(&schedule_config);

        let plan = plan_day(&SunriseProvider, date, latitude, longitude, &schedule_config)
            .with_context(|| format!("Failed to derive the schedule for {date}"))?;

        if self.json {
            let json = serde_json::to_string_pretty(&plan).context("Failed to serialize schedule")?;
            println!("{json}");
        } else {
            log_solar_times(&plan.today, &plan.tomorrow, &tz);
            if self.debug_enabled {
                log_solar_debug_info(&plan.today, latitude, longitude, &tz);
            }
            log_schedule(&plan.schedule, &plan.estimate, &schedule_config, self.debug_enabled);
        }

        if self.export {
            let dir = self.export_dir.unwrap_or_else(|| config.export_dir());
            let events = calendar_events(&plan.schedule);
            let path = write_ics(&dir, date, &events, time_source::now())?;

            log_block_start!("Calendar export");
            log_indented!("{} saved with {} events", path.display(), events.len());
        }

        log_end!();
        Ok(())
    }
}

fn main() -> Result<()> {
    let parsed_args = ParsedArgs::from_env();

    match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
            date,
            export_dir,
            no_export,
            json,
        } => {
            config::set_config_dir(config_dir)?;

            let mut runner = ApplicationRunner::new(debug_enabled)
                .with_date(date)
                .with_export_dir(export_dir)
                .json_output(json);
            if no_export {
                runner = runner.without_export();
            }

            if let Err(e) = runner.run() {
                if json {
                    eprintln!("Error: {e:#}");
                } else {
                    log_error_exit!("{e:#}");
                }
                std::process::exit(EXIT_FAILURE);
            }
            Ok(())
        }
    }
}
