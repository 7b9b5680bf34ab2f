//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags plus the options that pick the configuration
//! directory, the date to plan for, and where (or whether) to export.

use chrono::NaiveDate;

use crate::time_source::parse_date;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Derive and print the schedule with these settings
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        /// Plan for this date instead of today
        date: Option<NaiveDate>,
        /// Overrides the configured export directory
        export_dir: Option<String>,
        no_export: bool,
        json: bool,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or incomplete arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped. Any unknown or
    /// incomplete option turns the whole result into
    /// [`CliAction::ShowHelpDueToError`]; otherwise version wins over help,
    /// and help wins over running.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;
        let mut config_dir: Option<String> = None;
        let mut date: Option<NaiveDate> = None;
        let mut export_dir: Option<String> = None;
        let mut no_export = false;
        let mut json = false;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = args_vec[i].as_str();
            let value = args_vec
                .get(i + 1)
                .filter(|next| !next.starts_with('-'))
                .cloned();

            match arg_str {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--no-export" => no_export = true,
                "--json" => json = true,
                "--config" | "-c" => match value {
                    Some(dir) => {
                        config_dir = Some(dir);
                        i += 1;
                    }
                    None => {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        unknown_arg_found = true;
                    }
                },
                "--export" | "-e" => match value {
                    Some(dir) => {
                        export_dir = Some(dir);
                        i += 1;
                    }
                    None => {
                        log_warning!("Missing directory for --export. Usage: --export <directory>");
                        unknown_arg_found = true;
                    }
                },
                "--date" | "-D" => match value.as_deref().map(parse_date) {
                    Some(Ok(parsed)) => {
                        date = Some(parsed);
                        i += 1;
                    }
                    Some(Err(e)) => {
                        log_warning!("{}", e);
                        unknown_arg_found = true;
                        i += 1;
                    }
                    None => {
                        log_warning!("Missing date for --date. Usage: --date <YYYY-MM-DD>");
                        unknown_arg_found = true;
                    }
                },
                _ => {
                    log_warning!("Unknown option: {}", arg_str);
                    unknown_arg_found = true;
                }
            }
            i += 1;
        }

        let action = if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else {
            CliAction::Run {
                debug_enabled,
                config_dir,
                date,
                export_dir,
                no_export,
                json,
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("circadian [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Show solar details and sleep window adjustments");
    log_indented!("-D, --date <date>      Plan for YYYY-MM-DD instead of today");
    log_indented!("-e, --export <dir>     Write the calendar file into <dir>");
    log_indented!("    --no-export        Do not write a calendar file");
    log_indented!("    --json             Print the schedule as JSON");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Environment:");
    log_indented!("LATITUDE, LONGITUDE, TIME_ZONE, CURRENT_WAKE_UP_TIME,");
    log_indented!("NEXT_WAKE_UP_EARLIEST_TIME, NEXT_WAKE_UP_LATEST_TIME,");
    log_indented!("BAD_SLEEP_MINUTES, WIND_DOWN_BEFORE_SLEEP_MINUTES,");
    log_indented!("BREAKFAST_AFTER_WAKE_UP_MINUTES, DINNER_BEFORE_SLEEP_MINUTES,");
    log_indented!("WORKING_HOURS, EXPORT_DIR (override circadian.toml)");
    log_end!();
}
