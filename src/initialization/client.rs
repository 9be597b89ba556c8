//! HTTP client initialization.
//!
//! Each target gets its own client because timeout, TLS, redirect and
//! protocol settings are all per-target.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::fetch::ClientOptions;

/// Builds the HTTP client for one target.
///
/// A `timeout_secs` of zero or less leaves the request without a client-side
/// timeout.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails (e.g. the TLS backend
/// cannot be initialized).
pub fn init_client(
    timeout_secs: f64,
    options: &ClientOptions,
) -> Result<reqwest::Client, reqwest::Error> {
    let redirect = if options.max_redirects == 0 {
        reqwest::redirect::Policy::none()
    } else {
        reqwest::redirect::Policy::limited(options.max_redirects)
    };

    let mut builder = ClientBuilder::new()
        .redirect(redirect)
        .danger_accept_invalid_certs(options.insecure);

    if let Some(timeout) = positive_duration(timeout_secs) {
        builder = builder.timeout(timeout);
    }
    if let Some(connect) = options.connect_timeout.and_then(positive_duration) {
        builder = builder.connect_timeout(connect);
    }
    if let Some(user_agent) = &options.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    if options.http1_only {
        builder = builder.http1_only();
    }

    builder.build()
}

fn positive_duration(secs: f64) -> Option<Duration> {
    (secs.is_finite() && secs > 0.0).then(|| Duration::from_secs_f64(secs))
}
