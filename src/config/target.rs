//! Per-target configuration.
//!
//! A [`TargetConfig`] is resolved once per invocation from [`Settings`],
//! including its pattern chain, so the probe never goes back to string-keyed
//! lookups while measuring.

use log::{debug, info};

use crate::config::constants::*;
use crate::config::settings::Settings;
use crate::error_handling::ConfigError;
use crate::fetch::ClientOptions;
use crate::validate::{MatchOptions, PatternChain, PatternStep};

/// Effective settings for one probed URL.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    /// Short name the target was declared under
    pub name: String,
    pub url: String,
    /// POST payload; `None` means a plain GET
    pub post_data: Option<String>,
    pub label: String,
    /// Client-side timeout in seconds (<= 0 disables it)
    pub timeout: f64,
    pub error_value: f64,
    pub regex_error_value: f64,
    pub match_options: MatchOptions,
    pub client_options: ClientOptions,
    pub join_lines: bool,
    pub warning: f64,
    pub critical: f64,
    pub max: f64,
    pub patterns: PatternChain,
}

impl TargetConfig {
    /// Resolves target `name`, or `None` when it has no URL.
    pub fn resolve(settings: &Settings, name: &str) -> Option<Self> {
        let url = settings.lookup(name, KEY_URL)?.trim().to_string();

        let timeout = settings.lookup_number(name, KEY_TIMEOUT, DEFAULT_TIMEOUT_SECS);

        Some(TargetConfig {
            name: name.to_string(),
            url,
            post_data: settings.lookup(name, KEY_POSTDATA).map(str::to_string),
            label: settings.lookup_or(name, KEY_LABEL, name).to_string(),
            timeout,
            error_value: settings.lookup_number(name, KEY_ERROR_VALUE, DEFAULT_ERROR_VALUE),
            regex_error_value: settings.lookup_number(
                name,
                KEY_REGEX_ERROR_VALUE,
                DEFAULT_REGEX_ERROR_VALUE,
            ),
            match_options: MatchOptions::parse(settings.lookup_or(
                name,
                KEY_GREP_OPTS,
                DEFAULT_GREP_OPTS,
            )),
            client_options: ClientOptions::parse(settings.lookup_or(
                name,
                KEY_CLIENT_OPTS,
                DEFAULT_CLIENT_OPTS,
            )),
            join_lines: settings.lookup_flag(name, KEY_JOIN_LINES, DEFAULT_JOIN_LINES),
            // Derived from the resolved timeout, not the built-in one
            warning: settings.lookup_number(name, KEY_WARNING, timeout / 2.0),
            critical: settings.lookup_number(name, KEY_CRITICAL, timeout),
            max: settings.lookup_number(name, KEY_MAX, timeout * 2.0),
            patterns: pattern_chain(settings, name),
        })
    }

    /// Value reported when no response artifact could be created.
    pub fn storage_error_value(&self) -> f64 {
        self.error_value * 2.0
    }
}

/// Collects `regex_header_<k>` / `regex_body_<k>` for k = 1, 2, ... until an
/// index has neither.
fn pattern_chain(settings: &Settings, name: &str) -> PatternChain {
    let mut steps = Vec::new();
    for index in 1.. {
        let header = settings
            .lookup(name, &format!("{KEY_REGEX_HEADER_PREFIX}{index}"))
            .map(str::to_string);
        let body = settings
            .lookup(name, &format!("{KEY_REGEX_BODY_PREFIX}{index}"))
            .map(str::to_string);
        if header.is_none() && body.is_none() {
            break;
        }
        steps.push(PatternStep { header, body });
    }
    debug!("Target {} has {} pattern step(s)", name, steps.len());
    PatternChain::new(steps)
}

/// Resolves every declared target, in declaration order, skipping those
/// without a URL.
///
/// # Errors
///
/// Returns [`ConfigError::MissingNames`] when no target names are configured.
pub fn load_targets(settings: &Settings) -> Result<Vec<TargetConfig>, ConfigError> {
    let targets = settings
        .names()?
        .iter()
        .filter_map(|name| {
            let target = TargetConfig::resolve(settings, name);
            if target.is_none() {
                info!("Skipping target {}: no {}_{} configured", name, KEY_URL, name);
            }
            target
        })
        .collect();
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        Settings::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_builtin_defaults() {
        let s = settings(&[("url_home", "http://example.com/")]);
        let t = TargetConfig::resolve(&s, "home").unwrap();
        assert_eq!(t.url, "http://example.com/");
        assert_eq!(t.label, "home");
        assert_eq!(t.timeout, 20.0);
        assert_eq!(t.error_value, 30.0);
        assert_eq!(t.regex_error_value, 40.0);
        assert_eq!(t.storage_error_value(), 60.0);
        assert_eq!(t.warning, 10.0);
        assert_eq!(t.critical, 20.0);
        assert_eq!(t.max, 40.0);
        assert!(t.join_lines);
        assert!(t.post_data.is_none());
        assert!(t.match_options.case_insensitive);
        assert!(t.client_options.no_cache);
        assert_eq!(t.client_options.retries, 0);
        assert!(t.patterns.is_empty());
    }

    #[test]
    fn test_thresholds_follow_resolved_timeout() {
        let s = settings(&[
            ("url_home", "http://example.com/"),
            ("timeout", "8"),
            ("timeout_home", "15"),
        ]);
        let t = TargetConfig::resolve(&s, "home").unwrap();
        assert_eq!(t.timeout, 15.0);
        assert_eq!(t.warning, 7.5);
        assert_eq!(t.critical, 15.0);
        assert_eq!(t.max, 30.0);
    }

    #[test]
    fn test_explicit_thresholds_win() {
        let s = settings(&[
            ("url_home", "http://example.com/"),
            ("warning_home", "0"),
            ("critical", "12"),
        ]);
        let t = TargetConfig::resolve(&s, "home").unwrap();
        assert_eq!(t.warning, 0.0);
        assert_eq!(t.critical, 12.0);
    }

    #[test]
    fn test_target_without_url_is_skipped() {
        let s = settings(&[("url_home", "http://example.com/")]);
        assert!(TargetConfig::resolve(&s, "shop").is_none());
    }

    #[test]
    fn test_global_url_applies_to_every_target() {
        let s = settings(&[("url", "http://example.com/")]);
        assert!(TargetConfig::resolve(&s, "anything").is_some());
    }

    #[test]
    fn test_pattern_chain_stops_at_first_empty_index() {
        let s = settings(&[
            ("url_home", "http://example.com/"),
            ("regex_header_1_home", "200 OK"),
            ("regex_body_2_home", "Welcome"),
            ("regex_header_4_home", "never reached"),
        ]);
        let t = TargetConfig::resolve(&s, "home").unwrap();
        let steps = t.patterns.steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].header.as_deref(), Some("200 OK"));
        assert!(steps[0].body.is_none());
        assert_eq!(steps[1].body.as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_pattern_chain_gap_at_first_index_is_empty() {
        let s = settings(&[
            ("url_home", "http://example.com/"),
            ("regex_header_2_home", "200 OK"),
        ]);
        let t = TargetConfig::resolve(&s, "home").unwrap();
        assert!(t.patterns.is_empty());
    }

    #[test]
    fn test_load_targets_keeps_order_and_skips() {
        let s = settings(&[
            ("names", "a b c"),
            ("url_a", "http://a.example/"),
            ("url_c", "http://c.example/"),
        ]);
        let targets = load_targets(&s).unwrap();
        let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_load_targets_without_names() {
        let s = settings(&[("url_a", "http://a.example/")]);
        assert!(matches!(load_targets(&s), Err(ConfigError::MissingNames)));
    }
}
