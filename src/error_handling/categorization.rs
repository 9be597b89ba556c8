//! Error categorization and retry strategy.
//!
//! This module provides functions to categorize transport errors and to build
//! the retry strategy requested by a target's client options.

use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

use super::types::{TransportError, TransportErrorKind};

/// Creates the retry strategy for a fetch.
///
/// Retries happen immediately (no backoff) and the iterator yields exactly
/// `retries` delays, so `retries = 0` means a single attempt.
pub fn get_retry_strategy(retries: usize) -> impl Iterator<Item = Duration> {
    FixedInterval::new(Duration::ZERO).take(retries)
}

/// Categorizes a [`TransportError`] into a [`TransportErrorKind`].
pub fn categorize_transport_error(error: &TransportError) -> TransportErrorKind {
    match error {
        TransportError::InvalidUrl(_) => TransportErrorKind::InvalidUrl,
        TransportError::Status(_) => TransportErrorKind::Status,
        TransportError::Request(e) => categorize_reqwest_error(e),
    }
}

/// Categorizes a `reqwest::Error` into a [`TransportErrorKind`].
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportErrorKind {
    if error.is_builder() {
        TransportErrorKind::Builder
    } else if error.is_redirect() {
        TransportErrorKind::Redirect
    } else if error.is_status() {
        TransportErrorKind::Status
    } else if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else if error.is_request() {
        TransportErrorKind::Request
    } else if error.is_body() {
        TransportErrorKind::Body
    } else if error.is_decode() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Other
    }
}
