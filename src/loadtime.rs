//! Load time resolution.
//!
//! Turns a [`FetchResult`] into the single number reported for a target.
//! Checks run in a fixed order and the first that applies wins:
//!
//! 1. no artifact: storage error value (twice the transport error value)
//! 2. transport failed and the error value is positive: error value
//! 3. a pattern did not match: regex error value
//! 4. otherwise: the measured time

use std::fmt;
use std::time::Duration;

use log::{debug, warn};

use crate::config::TargetConfig;
use crate::fetch::FetchResult;
use crate::response::SplitResponse;

/// The value reported for one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadTime {
    /// Wall-clock time of a successful (or ignored-failure) fetch
    Measured(Duration),
    /// The response artifact could not be created
    StorageFailure(f64),
    /// The HTTP client failed
    TransportFailure(f64),
    /// A header or body pattern did not match
    PatternMismatch(f64),
}

impl LoadTime {
    pub fn value(&self) -> f64 {
        match self {
            LoadTime::Measured(elapsed) => elapsed.as_secs_f64(),
            LoadTime::StorageFailure(v)
            | LoadTime::TransportFailure(v)
            | LoadTime::PatternMismatch(v) => *v,
        }
    }
}

impl fmt::Display for LoadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadTime::Measured(elapsed) => write!(f, "{:.2}", elapsed.as_secs_f64()),
            other => write!(f, "{}", other.value()),
        }
    }
}

/// Resolves the reported value for `target` from its fetch outcome.
pub fn resolve(fetch: &FetchResult, target: &TargetConfig) -> LoadTime {
    let Some(artifact) = fetch.artifact.as_ref() else {
        return LoadTime::StorageFailure(target.storage_error_value());
    };

    // An error value of 0 means transport failures are ignored
    if !fetch.transport_ok && target.error_value > 0.0 {
        return LoadTime::TransportFailure(target.error_value);
    }

    if !target.patterns.is_empty() {
        let raw = std::fs::read(artifact.path()).unwrap_or_else(|e| {
            warn!(
                "Cannot read response artifact {}: {}",
                artifact.path().display(),
                e
            );
            Vec::new()
        });
        let response = SplitResponse::from_raw(&raw, target.join_lines);
        if !target.patterns.validate(&response, &target.match_options) {
            debug!("Target {} failed pattern validation", target.name);
            return LoadTime::PatternMismatch(target.regex_error_value);
        }
    }

    LoadTime::Measured(fetch.elapsed)
}
