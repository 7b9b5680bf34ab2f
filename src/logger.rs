//! Structured console logging with box-drawing decoration.
//!
//! Every line circadian prints goes through this module so that the output
//! keeps one visual shape: a header (`┏ circadian vX.Y.Z ━━╸`), blocks opened
//! with `┣`, nested details indented under `┃`, and a closing `╹`.
//!
//! ## Logging Conventions
//!
//! - **`log_block_start!`**: opens a new conceptual block (a section of the
//!   schedule, a configuration summary). Prints an empty `┃` line for spacing,
//!   then `┣ message`.
//! - **`log_indented!`**: nested detail, printed as `┃   message`.
//! - **`log_pipe!`**: a bare `┃` spacer, used before a level-tagged message
//!   that starts its own block.
//! - **`log_version!`** / **`log_end!`**: header and terminator, once per run.
//! - **`log_warning!`, `log_debug!`**: level-tagged
//!   lines (`┣[WARNING] message`) for messages that carry a severity.
//! - **`log_error_exit!`**: a terminal error that closes the output (`┗[ERROR]`).
//!
//! Logging can be switched off at runtime, which `--json` relies on to keep
//! stdout machine-readable.

use std::fmt;
use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Visual shape of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Indented,
    Pipe,
    BlockStart,
    Version,
    End,
    Warning,
    ErrorExit,
    Debug,
}

/// Runtime switches for the logger.
pub struct Log;

impl Log {
    /// Enable or disable all log output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }
}

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Render one line (including its trailing newline) without writing it.
pub fn render(kind: LineKind, message: fmt::Arguments<'_>) -> String {
    match kind {
        LineKind::Indented => format!("┃   {message}\n"),
        LineKind::Pipe => "┃\n".to_string(),
        LineKind::BlockStart => format!("┃\n┣ {message}\n"),
        LineKind::Version => format!("┏ {message} ━━╸\n"),
        LineKind::End => "╹\n".to_string(),
        LineKind::Warning => format!("┣[{YELLOW}WARNING{RESET}] {message}\n"),
        LineKind::ErrorExit => format!("┃\n┗[{RED}ERROR{RESET}] {message}\n"),
        LineKind::Debug => format!("┣[{GREEN}DEBUG{RESET}] {message}\n"),
    }
}

/// Entry point used by the logging macros.
pub fn emit(kind: LineKind, message: fmt::Arguments<'_>) {
    if !Log::is_enabled() {
        return;
    }
    let line = render(kind, message);
    let mut stdout = std::io::stdout();
    if stdout.is_terminal() {
        let _ = stdout.write_all(line.as_bytes());
    } else {
        let _ = stdout.write_all(strip_ansi_codes(&line).as_bytes());
    }
    let _ = stdout.flush();
}

/// Remove `ESC [ ... m` colour sequences.
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

// # Logging Macros

/// Log a nested `┃   message` detail line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => {
        $crate::logger::emit($crate::logger::LineKind::Indented, format_args!($($arg)*))
    };
}

/// Log an empty `┃` spacer.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::emit($crate::logger::LineKind::Pipe, format_args!(""))
    };
}

/// Open a new block.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => {
        $crate::logger::emit($crate::logger::LineKind::BlockStart, format_args!($($arg)*))
    };
}

/// Print the application header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::emit(
            $crate::logger::LineKind::Version,
            format_args!("circadian v{}", env!("CARGO_PKG_VERSION")),
        )
    };
}

/// Print the final terminator.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::emit($crate::logger::LineKind::End, format_args!(""))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::logger::emit($crate::logger::LineKind::Warning, format_args!($($arg)*))
    };
}

/// Log an error that terminates the run, closing the output with `┗`.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)*) => {
        $crate::logger::emit($crate::logger::LineKind::ErrorExit, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::emit($crate::logger::LineKind::Debug, format_args!($($arg)*))
    };
}
