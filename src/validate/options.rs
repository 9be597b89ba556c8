//! grep-style match options.
//!
//! Targets configure matching with the flags they would hand to grep
//! (`-Ei`, `--fixed-strings`, ...). They are parsed once into
//! [`MatchOptions`] and applied when patterns are compiled.

use log::warn;
use regex::{Regex, RegexBuilder};

/// How header and body patterns are compiled and applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// `-i`: ignore case
    pub case_insensitive: bool,
    /// `-F`: treat the pattern as a literal string
    pub fixed_strings: bool,
    /// `-w`: the match must form whole words
    pub word: bool,
    /// `-x`: the match must span the whole line
    pub whole_line: bool,
    /// `-v`: select lines that do NOT match
    pub invert: bool,
}

impl MatchOptions {
    /// Parses grep-style flags. Unknown flags are logged and ignored.
    pub fn parse(raw: &str) -> Self {
        let mut options = MatchOptions::default();
        for token in raw.split_whitespace() {
            if let Some(long) = token.strip_prefix("--") {
                options.apply_long(long);
            } else if let Some(shorts) = token.strip_prefix('-') {
                for flag in shorts.chars() {
                    options.apply_short(flag);
                }
            } else {
                warn!("Ignoring match option {:?}: not a flag", token);
            }
        }
        options
    }

    fn apply_short(&mut self, flag: char) {
        match flag {
            // Extended syntax is what the regex engine speaks anyway
            'E' => {}
            'i' => self.case_insensitive = true,
            'F' => self.fixed_strings = true,
            'w' => self.word = true,
            'x' => self.whole_line = true,
            'v' => self.invert = true,
            other => warn!("Ignoring unsupported match option -{}", other),
        }
    }

    fn apply_long(&mut self, flag: &str) {
        match flag {
            "extended-regexp" => {}
            "ignore-case" => self.case_insensitive = true,
            "fixed-strings" => self.fixed_strings = true,
            "word-regexp" => self.word = true,
            "line-regexp" => self.whole_line = true,
            "invert-match" => self.invert = true,
            other => warn!("Ignoring unsupported match option --{}", other),
        }
    }

    /// Compiles `pattern` according to these options.
    ///
    /// # Errors
    ///
    /// Returns the regex error when the pattern is not valid syntax.
    pub fn compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        let mut expr = if self.fixed_strings {
            regex::escape(pattern)
        } else {
            pattern.to_string()
        };
        if self.whole_line {
            expr = format!("^(?:{expr})$");
        } else if self.word {
            expr = format!(r"\b(?:{expr})\b");
        }
        RegexBuilder::new(&expr)
            .case_insensitive(self.case_insensitive)
            .build()
    }

    /// Whether `text` is selected by `regex`, line by line as grep does it.
    pub fn is_match(&self, regex: &Regex, text: &str) -> bool {
        let selected = |line: &str| regex.is_match(line) != self.invert;
        // Empty text still holds one empty line
        if text.is_empty() {
            return selected("");
        }
        text.lines().any(selected)
    }
}
