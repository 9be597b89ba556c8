//! Ordered header/body pattern chain.

use log::{debug, warn};

use super::options::MatchOptions;
use crate::response::SplitResponse;

/// Patterns configured at one index of the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternStep {
    /// Must match the response header, if set
    pub header: Option<String>,
    /// Must match the response body, if set
    pub body: Option<String>,
}

/// Contiguous sequence of [`PatternStep`]s, index 1 first.
///
/// Built once from configuration; the first index with neither a header nor
/// a body pattern ends the chain, so later indices are never consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternChain {
    steps: Vec<PatternStep>,
}

impl PatternChain {
    pub fn new(steps: Vec<PatternStep>) -> Self {
        PatternChain { steps }
    }

    pub fn steps(&self) -> &[PatternStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Checks every step in order, header before body.
    ///
    /// Returns `false` at the first pattern that does not match (or does not
    /// compile); later steps are not evaluated.
    pub fn validate(&self, response: &SplitResponse, options: &MatchOptions) -> bool {
        for (i, step) in self.steps.iter().enumerate() {
            let index = i + 1;
            if let Some(pattern) = &step.header {
                if !matches(pattern, &response.header, options) {
                    debug!("Header pattern {} ({:?}) did not match", index, pattern);
                    return false;
                }
            }
            if let Some(pattern) = &step.body {
                if !matches(pattern, &response.body, options) {
                    debug!("Body pattern {} ({:?}) did not match", index, pattern);
                    return false;
                }
            }
        }
        true
    }
}

fn matches(pattern: &str, text: &str, options: &MatchOptions) -> bool {
    match options.compile(pattern) {
        Ok(regex) => options.is_match(&regex, text),
        Err(e) => {
            warn!("Invalid pattern {:?}: {}", pattern, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> SplitResponse {
        SplitResponse::from_raw(
            b"HTTP/1.1 200 OK\r\nServer: nginx\r\n\r\n<html>\r\n<title>Shop</title>\r\n</html>\r\n",
            true,
        )
    }

    fn step(header: Option<&str>, body: Option<&str>) -> PatternStep {
        PatternStep {
            header: header.map(str::to_string),
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_chain_always_succeeds() {
        let chain = PatternChain::default();
        assert!(chain.validate(&SplitResponse::default(), &MatchOptions::default()));
    }

    #[test]
    fn test_all_steps_match() {
        let chain = PatternChain::new(vec![
            step(Some("200 OK"), Some("<title>shop</title>")),
            step(Some("^server: nginx$"), None),
            step(None, Some("<html>.*</html>")),
        ]);
        assert!(chain.validate(&response(), &MatchOptions::parse("-Ei")));
    }

    #[test]
    fn test_header_mismatch_fails() {
        let chain = PatternChain::new(vec![step(Some("404 Not Found"), None)]);
        assert!(!chain.validate(&response(), &MatchOptions::parse("-Ei")));
    }

    #[test]
    fn test_body_mismatch_at_later_step_fails() {
        let chain = PatternChain::new(vec![
            step(Some("200"), None),
            step(None, Some("checkout")),
        ]);
        assert!(!chain.validate(&response(), &MatchOptions::parse("-Ei")));
    }

    #[test]
    fn test_body_is_not_searched_for_header_patterns() {
        let chain = PatternChain::new(vec![step(Some("<title>"), None)]);
        assert!(!chain.validate(&response(), &MatchOptions::parse("-Ei")));
    }

    #[test]
    fn test_invalid_pattern_is_a_mismatch() {
        let chain = PatternChain::new(vec![step(None, Some("(unclosed"))]);
        assert!(!chain.validate(&response(), &MatchOptions::parse("-Ei")));
    }
}
