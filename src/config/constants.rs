//! Configuration constants.
//!
//! This module defines the setting keys read from the environment and the
//! built-in defaults used when neither a per-target nor a global value is set.

/// Whitespace-separated list of target names. The only required setting.
pub const KEY_NAMES: &str = "names";

// Per-target keys (also accepted as global defaults)
pub const KEY_URL: &str = "url";
pub const KEY_LABEL: &str = "label";
pub const KEY_TIMEOUT: &str = "timeout";
pub const KEY_WARNING: &str = "warning";
pub const KEY_CRITICAL: &str = "critical";
pub const KEY_MAX: &str = "max";
pub const KEY_ERROR_VALUE: &str = "error_value";
pub const KEY_REGEX_ERROR_VALUE: &str = "regex_error_value";
pub const KEY_GREP_OPTS: &str = "grep_opts";
pub const KEY_CLIENT_OPTS: &str = "client_opts";
pub const KEY_POSTDATA: &str = "postdata";
pub const KEY_JOIN_LINES: &str = "join_lines";

/// Prefix of the indexed header pattern keys (`regex_header_1`, `regex_header_2`, ...)
pub const KEY_REGEX_HEADER_PREFIX: &str = "regex_header_";
/// Prefix of the indexed body pattern keys (`regex_body_1`, `regex_body_2`, ...)
pub const KEY_REGEX_BODY_PREFIX: &str = "regex_body_";

// Graph metadata keys (global only)
pub const KEY_GRAPH_TITLE: &str = "graph_title";
pub const KEY_GRAPH_VLABEL: &str = "graph_vlabel";
pub const KEY_GRAPH_CATEGORY: &str = "graph_category";
pub const KEY_GRAPH_INFO: &str = "graph_info";

/// Value reported when the HTTP client fails.
/// A value of 0 disables transport error handling entirely.
pub const DEFAULT_ERROR_VALUE: f64 = 30.0;
/// Value reported when a header or body pattern does not match.
pub const DEFAULT_REGEX_ERROR_VALUE: f64 = 40.0;
/// Client-side timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 20.0;
/// Default grep-style match flags: extended syntax, case-insensitive
pub const DEFAULT_GREP_OPTS: &str = "-Ei";
/// Default client options: bypass caches, single attempt
pub const DEFAULT_CLIENT_OPTS: &str = "no-cache;retries=0";
pub const DEFAULT_JOIN_LINES: bool = true;

pub const DEFAULT_GRAPH_TITLE: &str = "HTTP load time";
pub const GRAPH_ARGS: &str = "--base 1000 -l 0";
pub const GRAPH_SCALE: &str = "no";
pub const DEFAULT_GRAPH_VLABEL: &str = "Load time in seconds";
pub const DEFAULT_GRAPH_CATEGORY: &str = "network";
pub const DEFAULT_GRAPH_INFO: &str =
    "This graph shows the time in seconds needed to load each configured URL";

/// Field name prefix of the reported metrics (`loadtime1`, `loadtime2`, ...)
pub const FIELD_PREFIX: &str = "loadtime";

/// Redirect hops followed when the `follow-redirects` client option is set
pub const MAX_REDIRECT_HOPS: usize = 10;
