//! HTTP client options and request building.
//!
//! Targets configure the client with a `;`-separated list of
//! `name[=value]` tokens, e.g. `no-cache;retries=1;header=Accept: text/html`.

use log::warn;

use crate::config::MAX_REDIRECT_HOPS;

/// Per-target HTTP client behaviour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientOptions {
    /// Ask caches along the way for a fresh copy
    pub no_cache: bool,
    /// Extra attempts after a failed one (0 = single attempt)
    pub retries: usize,
    /// Accept invalid TLS certificates
    pub insecure: bool,
    /// Redirect hops to follow (0 = report the redirect response itself)
    pub max_redirects: usize,
    /// Treat HTTP 4xx/5xx responses as transport failures
    pub fail_on_status: bool,
    pub user_agent: Option<String>,
    /// Extra request headers, in configuration order
    pub headers: Vec<(String, String)>,
    /// TCP connect timeout in seconds
    pub connect_timeout: Option<f64>,
    pub http1_only: bool,
}

impl ClientOptions {
    /// Parses client options. Unknown or malformed tokens are logged and
    /// ignored.
    pub fn parse(raw: &str) -> Self {
        let mut options = ClientOptions::default();
        for token in raw.split(';').map(str::trim).filter(|t| !t.is_empty()) {
            let (name, value) = match token.split_once('=') {
                Some((name, value)) => (name.trim(), Some(value.trim())),
                None => (token, None),
            };
            match (name, value) {
                ("no-cache", None) => options.no_cache = true,
                ("insecure", None) => options.insecure = true,
                ("fail", None) => options.fail_on_status = true,
                ("http1.1", None) => options.http1_only = true,
                ("follow-redirects", None) => options.max_redirects = MAX_REDIRECT_HOPS,
                ("retries", Some(v)) => match v.parse() {
                    Ok(n) => options.retries = n,
                    Err(_) => warn!("Ignoring client option {:?}: not a count", token),
                },
                ("max-redirects", Some(v)) => match v.parse() {
                    Ok(n) => options.max_redirects = n,
                    Err(_) => warn!("Ignoring client option {:?}: not a count", token),
                },
                ("connect-timeout", Some(v)) => match v.parse::<f64>() {
                    Ok(secs) if secs.is_finite() && secs > 0.0 => {
                        options.connect_timeout = Some(secs)
                    }
                    _ => warn!("Ignoring client option {:?}: not a timeout", token),
                },
                ("user-agent", Some(v)) => options.user_agent = Some(v.to_string()),
                ("header", Some(v)) => match v.split_once(':') {
                    Some((header, value)) => options
                        .headers
                        .push((header.trim().to_string(), value.trim().to_string())),
                    None => warn!("Ignoring client option {:?}: expected Name: value", token),
                },
                _ => warn!("Ignoring unsupported client option {:?}", token),
            }
        }
        options
    }

    /// Applies the per-request options to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        &self,
        mut builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        if self.no_cache {
            builder = builder
                .header(reqwest::header::CACHE_CONTROL, "no-cache")
                .header(reqwest::header::PRAGMA, "no-cache");
        }
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}
