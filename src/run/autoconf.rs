//! `autoconf` capability check.
//!
//! Verifies, in order, everything a fetch needs. The first failing check
//! decides the exit code.

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use log::warn;
use strum_macros::EnumIter as EnumIterMacro;

use crate::config::DEFAULT_GREP_OPTS;
use crate::fetch::{ClientOptions, Fetcher};
use crate::initialization::init_client;
use crate::validate::MatchOptions;

/// Capabilities the probe depends on, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Capability {
    HttpClient,
    Timer,
    TempArtifact,
    PatternMatcher,
    ArtifactReader,
}

impl Capability {
    /// Process exit code reported when this capability is missing.
    pub fn exit_code(&self) -> i32 {
        match self {
            Capability::HttpClient => 1,
            Capability::Timer => 2,
            Capability::TempArtifact => 3,
            Capability::PatternMatcher => 4,
            Capability::ArtifactReader => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::HttpClient => "HTTP client",
            Capability::Timer => "monotonic timer",
            Capability::TempArtifact => "temporary response artifact",
            Capability::PatternMatcher => "pattern matcher",
            Capability::ArtifactReader => "artifact reader",
        }
    }
}

const PROBE_CONTENT: &[u8] = b"HTTP/1.1 200 OK\r\n\r\nautoconf\r\n";

/// Runs all checks and returns the first missing capability, if any.
pub fn check_capabilities(fetcher: &Fetcher) -> Option<Capability> {
    if let Err(e) = init_client(1.0, &ClientOptions::default()) {
        warn!("{} unavailable: {}", Capability::HttpClient.as_str(), e);
        return Some(Capability::HttpClient);
    }

    if !timer_available() {
        warn!("{} unavailable", Capability::Timer.as_str());
        return Some(Capability::Timer);
    }

    let dir: PathBuf = fetcher.artifact_dir().to_path_buf();
    let mut artifact = match tempfile::NamedTempFile::new_in(&dir) {
        Ok(file) => file,
        Err(e) => {
            warn!(
                "{} unavailable in {}: {}",
                Capability::TempArtifact.as_str(),
                dir.display(),
                e
            );
            return Some(Capability::TempArtifact);
        }
    };

    let options = MatchOptions::parse(DEFAULT_GREP_OPTS);
    let matcher = match options.compile("^autoconf$") {
        Ok(regex) => regex,
        Err(e) => {
            warn!("{} unavailable: {}", Capability::PatternMatcher.as_str(), e);
            return Some(Capability::PatternMatcher);
        }
    };

    let read_back = artifact
        .write_all(PROBE_CONTENT)
        .and_then(|_| artifact.seek(SeekFrom::Start(0)))
        .and_then(|_| {
            let mut content = Vec::new();
            artifact.read_to_end(&mut content).map(|_| content)
        });
    match read_back {
        Ok(content) if content == PROBE_CONTENT => {}
        Ok(_) => {
            warn!("{} returned different content", Capability::ArtifactReader.as_str());
            return Some(Capability::ArtifactReader);
        }
        Err(e) => {
            warn!("{} unavailable: {}", Capability::ArtifactReader.as_str(), e);
            return Some(Capability::ArtifactReader);
        }
    }

    let text = String::from_utf8_lossy(PROBE_CONTENT).replace('\r', "");
    if !options.is_match(&matcher, &text) {
        warn!("{} did not match a known line", Capability::PatternMatcher.as_str());
        return Some(Capability::PatternMatcher);
    }

    None
}

/// The monotonic clock must not run backwards and the wall clock must be
/// past the epoch.
fn timer_available() -> bool {
    let first = Instant::now();
    let second = Instant::now();
    second.checked_duration_since(first).is_some()
        && SystemTime::now().duration_since(UNIX_EPOCH).is_ok()
}

/// Prints `yes` or `no` and returns the process exit code.
pub fn run_autoconf<W: Write>(out: &mut W, fetcher: &Fetcher) -> std::io::Result<i32> {
    match check_capabilities(fetcher) {
        None => {
            writeln!(out, "yes")?;
            Ok(0)
        }
        Some(missing) => {
            writeln!(out, "no")?;
            Ok(missing.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_exit_codes_are_distinct_and_ordered() {
        let codes: Vec<i32> = Capability::iter().map(|c| c.exit_code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_timer_is_available() {
        assert!(timer_available());
    }

    #[test]
    fn test_autoconf_yes() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut out = Vec::new();
        let code = run_autoconf(&mut out, &Fetcher::new(dir.path())).unwrap();
        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "yes\n");
    }

    #[test]
    fn test_autoconf_no_without_artifact_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let fetcher = Fetcher::new(dir.path().join("missing"));
        let mut out = Vec::new();
        let code = run_autoconf(&mut out, &fetcher).unwrap();
        assert_eq!(code, Capability::TempArtifact.exit_code());
        assert_eq!(String::from_utf8(out).unwrap(), "no\n");
    }
}
