//! Tests for command-line parsing.

use clap::Parser;
use http_loadtime::{LogFormat, LogLevel, Mode, Opt};

#[test]
fn test_no_arguments_fetches() {
    let opt = Opt::try_parse_from(["http_loadtime"]).unwrap();
    assert_eq!(opt.mode(), Mode::Fetch);
}

#[test]
fn test_autoconf_and_config_modes() {
    let opt = Opt::try_parse_from(["http_loadtime", "autoconf"]).unwrap();
    assert_eq!(opt.mode(), Mode::Autoconf);
    let opt = Opt::try_parse_from(["http_loadtime", "config"]).unwrap();
    assert_eq!(opt.mode(), Mode::Config);
}

#[test]
fn test_unknown_mode_is_accepted_and_fetches() {
    let opt = Opt::try_parse_from(["http_loadtime", "update"]).unwrap();
    assert_eq!(opt.mode.as_deref(), Some("update"));
    assert_eq!(opt.mode(), Mode::Fetch);
}

#[test]
fn test_logging_flags() {
    let opt = Opt::try_parse_from([
        "http_loadtime",
        "--log-level",
        "trace",
        "--log-format",
        "json",
    ])
    .unwrap();
    assert!(matches!(opt.log_level, LogLevel::Trace));
    assert!(matches!(opt.log_format, LogFormat::Json));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    assert!(Opt::try_parse_from(["http_loadtime", "--log-level", "loud"]).is_err());
}

#[test]
fn test_extra_positional_is_rejected() {
    assert!(Opt::try_parse_from(["http_loadtime", "config", "extra"]).is_err());
}
