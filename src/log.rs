//! The `log` module provides initialisation and configuration of the application's logging system.
//!
//! Logging is set up with colourised console output (errors and warnings go
//! to stderr, everything else to stdout) and, when an output folder is
//! available, a plain-text log file alongside the output data.
use anyhow::{Context, Result};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};
use std::env;
use std::fmt::{Arguments, Display};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock;

/// A flag indicating whether the logger has been initialised
static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// Whether the program logger has been initialised
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// The default log level for the program.
///
/// Used as a fallback if the user hasn't specified something else with the
/// `MERITSPLIT_LOG_LEVEL` environment variable or the settings file.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The name of the log file written alongside the output data
const LOG_FILE_NAME: &str = "meritsplit.log";

/// Initialise the program logger using the `fern` logging library.
///
/// The user can specify their preferred logging level via the settings file
/// (defaulting to `info` if not present) or with the `MERITSPLIT_LOG_LEVEL`
/// environment variable. If both are provided, the environment variable takes
/// precedence.
///
/// # Arguments
///
/// * `log_level_from_settings`: The log level specified in the settings file
/// * `log_file_path`: The folder to save a log file to (if `Some`)
pub fn init(log_level_from_settings: Option<&str>, log_file_path: Option<&Path>) -> Result<()> {
    let log_level = env::var("MERITSPLIT_LOG_LEVEL").unwrap_or_else(|_| {
        log_level_from_settings
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string()
    });
    let log_level: LevelFilter = log_level
        .parse()
        .with_context(|| format!("Unknown log level: {log_level}"))?;

    // Set up colours for log levels
    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    // Automatically apply colours only if the output is a terminal
    let use_colour_stdout = std::io::stdout().is_terminal();
    let use_colour_stderr = std::io::stderr().is_terminal();

    let mut dispatch = Dispatch::new()
        .chain(
            // Write non-error messages to stdout
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stdout, &colours);
                })
                .level(log_level)
                .chain(std::io::stdout()),
        )
        .chain(
            // Write error messages to stderr
            Dispatch::new()
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stderr, &colours);
                })
                .level(log_level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        );

    // Also write plain-text messages to a log file when a folder is available
    if let Some(log_file_path) = log_file_path {
        let log_file = fern::log_file(log_file_path.join(LOG_FILE_NAME))?;
        dispatch = dispatch.chain(
            Dispatch::new()
                .format(write_log_plain)
                .level(log_level)
                .chain(log_file),
        );
    }

    dispatch.apply().context("Logger already initialised")?;

    // Set a flag to indicate that the logger has been initialised
    LOGGER_INIT.set(()).expect("Logger already initialised");

    Ok(())
}

/// Write to the log in the format we want
fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");

    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

/// Write to the log with no colours
fn write_log_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_log(out, record.level(), record.target(), message);
}

/// Write to the log with optional colours
fn write_log_colour(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    use_colour: bool,
    colours: &ColoredLevelConfig,
) {
    // Format output with or without colour based on `use_colour`
    if use_colour {
        write_log(out, colours.color(record.level()), record.target(), message);
    } else {
        write_log_plain(out, message, record);
    }
}
