//! Header/body split of a captured HTTP response.

/// Where the scanner currently is in the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Body,
}

/// A captured response divided at its first blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitResponse {
    /// Status line and header lines, each newline-terminated
    pub header: String,
    /// Body lines, concatenated or newline-terminated depending on `join_lines`
    pub body: String,
}

impl SplitResponse {
    /// Splits raw response bytes into header and body text.
    ///
    /// Carriage returns are stripped first and a trailing newline is assumed,
    /// so a final unterminated line is still seen. With `join_lines`, body
    /// lines are concatenated so multi-line fragments match a single-line
    /// pattern.
    pub fn from_raw(raw: &[u8], join_lines: bool) -> Self {
        let mut text: String = String::from_utf8_lossy(raw)
            .chars()
            .filter(|&c| c != '\r')
            .collect();
        if !text.ends_with('\n') {
            text.push('\n');
        }

        let mut split = SplitResponse::default();
        let mut section = Section::Header;
        for line in text.lines() {
            match section {
                Section::Header if line.is_empty() => section = Section::Body,
                Section::Header => {
                    split.header.push_str(line);
                    split.header.push('\n');
                }
                Section::Body => {
                    split.body.push_str(line);
                    if !join_lines {
                        split.body.push('\n');
                    }
                }
            }
        }
        split
    }
}
