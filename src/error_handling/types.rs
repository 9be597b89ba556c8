//! Error type definitions.
//!
//! This module defines the error types used throughout the application and
//! the categories transport failures are logged under.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Configuration errors that abort the whole run.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No target names were configured.
    #[error("no target names configured: set the `names` environment variable")]
    MissingNames,
}

/// Reasons a single fetch did not complete.
///
/// These never abort the run: the probe maps them to the target's
/// transport error value.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The target URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client failed (connect, timeout, body read, ...).
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The server answered with an error status and the `fail` client
    /// option is set.
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),
}

/// Categories of transport failures, used for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum TransportErrorKind {
    InvalidUrl,
    Builder,
    Redirect,
    Status,
    Timeout,
    Request,
    Connect,
    Body,
    Decode,
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::InvalidUrl => "Invalid URL",
            TransportErrorKind::Builder => "HTTP request builder error",
            TransportErrorKind::Redirect => "HTTP request redirect error",
            TransportErrorKind::Status => "HTTP request status error",
            TransportErrorKind::Timeout => "HTTP request timeout error",
            TransportErrorKind::Request => "HTTP request error",
            TransportErrorKind::Connect => "HTTP request connect error",
            TransportErrorKind::Body => "HTTP request body error",
            TransportErrorKind::Decode => "HTTP request decode error",
            TransportErrorKind::Other => "HTTP request other error",
        }
    }
}
