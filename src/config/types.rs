//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing.

use std::str::FromStr;

use clap::{Parser, ValueEnum};
use strum_macros::{AsRefStr, EnumString};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Invocation mode selected by the first positional argument.
///
/// The collector calls the probe with `autoconf`, `config`, or no argument at
/// all. Anything unrecognised falls through to a normal fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Report whether the probe can run on this host
    Autoconf,
    /// Print graph metadata and per-target declarations
    Config,
    /// Measure every target and print its load time
    Fetch,
}

impl Mode {
    /// Maps a positional argument to a mode, defaulting to [`Mode::Fetch`].
    pub fn from_arg(arg: Option<&str>) -> Self {
        arg.and_then(|a| Mode::from_str(a.trim()).ok())
            .unwrap_or(Mode::Fetch)
    }
}

/// Command-line options.
///
/// All probe settings come from the environment; the command line only
/// selects the mode and controls logging (which always goes to stderr).
///
/// # Examples
///
/// ```bash
/// # Print values
/// names="home" url_home=https://example.com/ http_loadtime
///
/// # Print graph metadata
/// names="home" url_home=https://example.com/ http_loadtime config
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "http_loadtime",
    about = "Measures page load time for configured URLs (munin plugin protocol)."
)]
pub struct Opt {
    /// Mode: autoconf|config (anything else, or nothing, fetches values)
    pub mode: Option<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// The invocation mode named by the positional argument.
    pub fn mode(&self) -> Mode {
        Mode::from_arg(self.mode.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_mode_from_arg() {
        assert_eq!(Mode::from_arg(Some("autoconf")), Mode::Autoconf);
        assert_eq!(Mode::from_arg(Some("config")), Mode::Config);
        assert_eq!(Mode::from_arg(Some("fetch")), Mode::Fetch);
        assert_eq!(Mode::from_arg(None), Mode::Fetch);
    }

    #[test]
    fn test_mode_unknown_arg_falls_through_to_fetch() {
        assert_eq!(Mode::from_arg(Some("suggest")), Mode::Fetch);
        assert_eq!(Mode::from_arg(Some("")), Mode::Fetch);
    }

    #[test]
    fn test_opt_defaults() {
        let opt = Opt::parse_from(["http_loadtime"]);
        assert!(opt.mode.is_none());
        assert_eq!(opt.mode(), Mode::Fetch);
        assert!(matches!(opt.log_level, LogLevel::Warn));
        assert!(matches!(opt.log_format, LogFormat::Plain));
    }

    #[test]
    fn test_opt_config_mode_with_logging_flags() {
        let opt = Opt::parse_from([
            "http_loadtime",
            "config",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ]);
        assert_eq!(opt.mode(), Mode::Config);
        assert!(matches!(opt.log_level, LogLevel::Debug));
        assert!(matches!(opt.log_format, LogFormat::Json));
    }
}
