//! Layered settings lookup.
//!
//! Every setting can be given globally (`timeout=10`) or per target name
//! (`timeout_home=5`). [`Settings::lookup`] resolves the per-target value
//! first, then the global one; callers supply the built-in default.

use std::collections::HashMap;
use std::ffi::OsString;

use log::{debug, warn};

use crate::config::constants::KEY_NAMES;
use crate::error_handling::ConfigError;

/// Flat key/value settings as supplied by the hosting collector.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Reads all settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    /// Builds settings from raw environment pairs.
    ///
    /// Keys that are not valid UTF-8 cannot name a setting and are skipped.
    /// Values that are not valid UTF-8 are kept, with invalid bytes replaced.
    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_pairs(pairs.into_iter().filter_map(|(key, value)| {
            let key = match key.into_string() {
                Ok(key) => key,
                Err(raw) => {
                    debug!("Skipping environment entry with non-UTF-8 key {:?}", raw);
                    return None;
                }
            };
            let value = value.into_string().unwrap_or_else(|raw| {
                warn!("Setting {} is not valid UTF-8, replacing invalid bytes", key);
                raw.to_string_lossy().into_owned()
            });
            Some((key, value))
        }))
    }

    /// Builds settings from arbitrary key/value pairs.
    ///
    /// Empty or whitespace-only values are dropped so that they behave as if
    /// the setting had not been given at all.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        Settings { values }
    }

    /// Global value of `key`, if set.
    pub fn global(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value of `key` for target `name`: `<key>_<name>`, else `<key>`.
    pub fn lookup(&self, name: &str, key: &str) -> Option<&str> {
        self.values
            .get(&format!("{key}_{name}"))
            .or_else(|| self.values.get(key))
            .map(String::as_str)
    }

    /// Like [`Settings::lookup`], falling back to `default`.
    pub fn lookup_or<'a>(&'a self, name: &str, key: &str, default: &'a str) -> &'a str {
        self.lookup(name, key).unwrap_or(default)
    }

    /// Numeric setting for target `name`, falling back to `default` when
    /// absent or unparseable.
    pub fn lookup_number(&self, name: &str, key: &str, default: f64) -> f64 {
        match self.lookup(name, key) {
            None => default,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    warn!(
                        "Ignoring invalid {} value {:?} for target {}, using {}",
                        key, raw, name, default
                    );
                    default
                }
            },
        }
    }

    /// Boolean setting for target `name`, falling back to `default` when
    /// absent or unparseable.
    pub fn lookup_flag(&self, name: &str, key: &str, default: bool) -> bool {
        match self.lookup(name, key) {
            None => default,
            Some(raw) => parse_flag(raw).unwrap_or_else(|| {
                warn!(
                    "Ignoring invalid {} value {:?} for target {}, using {}",
                    key, raw, name, default
                );
                default
            }),
        }
    }

    /// The configured target names, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingNames`] when the name list is absent.
    pub fn names(&self) -> Result<Vec<String>, ConfigError> {
        let names: Vec<String> = self
            .global(KEY_NAMES)
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        if names.is_empty() {
            return Err(ConfigError::MissingNames);
        }
        Ok(names)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        Settings::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_lookup_prefers_target_override() {
        let s = settings(&[("timeout", "10"), ("timeout_home", "5")]);
        assert_eq!(s.lookup("home", "timeout"), Some("5"));
        assert_eq!(s.lookup("shop", "timeout"), Some("10"));
    }

    #[test]
    fn test_lookup_falls_back_to_default() {
        let s = settings(&[]);
        assert_eq!(s.lookup("home", "timeout"), None);
        assert_eq!(s.lookup_or("home", "label", "home"), "home");
        assert_eq!(s.lookup_number("home", "timeout", 20.0), 20.0);
        assert!(s.lookup_flag("home", "join_lines", true));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let s = settings(&[("url_home", ""), ("url", "  ")]);
        assert_eq!(s.lookup("home", "url"), None);
    }

    #[test]
    fn test_invalid_number_uses_default() {
        let s = settings(&[("timeout_home", "soon"), ("timeout_shop", "inf")]);
        assert_eq!(s.lookup_number("home", "timeout", 20.0), 20.0);
        assert_eq!(s.lookup_number("shop", "timeout", 20.0), 20.0);
    }

    #[test]
    fn test_flag_parsing() {
        let s = settings(&[
            ("join_lines_a", "0"),
            ("join_lines_b", "Yes"),
            ("join_lines_c", "maybe"),
        ]);
        assert!(!s.lookup_flag("a", "join_lines", true));
        assert!(s.lookup_flag("b", "join_lines", false));
        assert!(!s.lookup_flag("c", "join_lines", false));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_environment_entries_do_not_abort() {
        use std::os::unix::ffi::OsStringExt;

        let s = Settings::from_os_pairs(vec![
            (OsString::from("names"), OsString::from("home")),
            (OsString::from("UNRELATED_HOST_VAR"), OsString::from_vec(b"f\xffo".to_vec())),
            (OsString::from_vec(b"k\xffey".to_vec()), OsString::from("ignored")),
            (OsString::from("regex_body_1"), OsString::from_vec(b"caf\xe9".to_vec())),
        ]);
        assert_eq!(s.names().unwrap(), vec!["home"]);
        assert_eq!(s.global("UNRELATED_HOST_VAR"), Some("f\u{fffd}o"));
        assert_eq!(s.lookup("home", "regex_body_1"), Some("caf\u{fffd}"));
        assert_eq!(s.values.len(), 3);
    }

    #[test]
    fn test_names_in_declaration_order() {
        let s = settings(&[("names", "home  shop\tblog")]);
        assert_eq!(s.names().unwrap(), vec!["home", "shop", "blog"]);
    }

    #[test]
    fn test_names_missing_is_an_error() {
        assert!(matches!(
            settings(&[]).names(),
            Err(ConfigError::MissingNames)
        ));
        assert!(matches!(
            settings(&[("names", " ")]).names(),
            Err(ConfigError::MissingNames)
        ));
    }
}
