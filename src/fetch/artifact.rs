//! Raw response capture.
//!
//! The probe keeps the response the way it came off the wire (status line,
//! headers, blank line, body) in a temporary file, so the splitter works on
//! the same bytes a raw HTTP dump would contain.

use std::io::{self, Write};
use std::path::Path;

use hyper::ext::ReasonPhrase;
use reqwest::{StatusCode, Version};
use tempfile::NamedTempFile;

/// A complete response, ready to be written out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawResponse {
    /// e.g. `HTTP/1.1 200 OK`
    pub status_line: String,
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Captures status line and headers; the body is filled in once read.
    pub fn head(response: &reqwest::Response) -> Self {
        RawResponse {
            status_line: status_line(
                response.version(),
                response.status(),
                response
                    .extensions()
                    .get::<ReasonPhrase>()
                    .map(ReasonPhrase::as_bytes),
            ),
            headers: response
                .headers()
                .iter()
                .map(|(name, value)| (name.as_str().to_string(), value.as_bytes().to_vec()))
                .collect(),
            body: Vec::new(),
        }
    }

    /// Writes the response in HTTP/1 wire framing.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}\r\n", self.status_line)?;
        for (name, value) in &self.headers {
            out.write_all(name.as_bytes())?;
            out.write_all(b": ")?;
            out.write_all(value)?;
            out.write_all(b"\r\n")?;
        }
        out.write_all(b"\r\n")?;
        out.write_all(&self.body)?;
        out.flush()
    }
}

/// Renders a status line as the server sent it.
///
/// `reason` is the server's own phrase when it differed from the canonical
/// one; otherwise the canonical phrase is used, if the code has one. HTTP/2
/// and HTTP/3 carry no reason phrase.
fn status_line(version: Version, status: StatusCode, reason: Option<&[u8]>) -> String {
    let (version, has_reason) = if version == Version::HTTP_2 {
        ("HTTP/2", false)
    } else if version == Version::HTTP_3 {
        ("HTTP/3", false)
    } else if version == Version::HTTP_10 {
        ("HTTP/1.0", true)
    } else if version == Version::HTTP_09 {
        ("HTTP/0.9", true)
    } else {
        ("HTTP/1.1", true)
    };
    let reason = match reason {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => status.canonical_reason().unwrap_or_default().to_string(),
    };
    if has_reason && !reason.is_empty() {
        format!("{} {} {}", version, status.as_str(), reason)
    } else {
        format!("{} {}", version, status.as_str())
    }
}

/// Creates an empty artifact in `dir`. Removed when the handle drops.
pub(crate) fn create_artifact(dir: &Path) -> io::Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix("http_loadtime.")
        .tempfile_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_uses_wire_framing() {
        let raw = RawResponse {
            status_line: "HTTP/1.1 200 OK".to_string(),
            headers: vec![
                ("content-type".to_string(), b"text/plain".to_vec()),
                ("server".to_string(), b"test".to_vec()),
            ],
            body: b"line one\nline two".to_vec(),
        };
        let mut out = Vec::new();
        raw.write_to(&mut out).unwrap();
        assert_eq!(
            out,
            b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\nserver: test\r\n\r\nline one\nline two"
                .to_vec()
        );
    }

    #[test]
    fn test_status_line_keeps_server_reason_phrase() {
        let status = StatusCode::from_u16(299).unwrap();
        assert_eq!(status_line(Version::HTTP_11, status, None), "HTTP/1.1 299");
        assert_eq!(
            status_line(Version::HTTP_11, status, Some(&b"Mostly Fine"[..])),
            "HTTP/1.1 299 Mostly Fine"
        );
        assert_eq!(
            status_line(Version::HTTP_11, StatusCode::OK, Some(&b"Alright"[..])),
            "HTTP/1.1 200 Alright"
        );
        assert_eq!(
            status_line(Version::HTTP_10, StatusCode::NOT_FOUND, None),
            "HTTP/1.0 404 Not Found"
        );
    }

    #[test]
    fn test_status_line_for_http2_and_http3() {
        assert_eq!(status_line(Version::HTTP_2, StatusCode::OK, None), "HTTP/2 200");
        assert_eq!(status_line(Version::HTTP_3, StatusCode::OK, None), "HTTP/3 200");
    }

    #[test]
    fn test_artifact_is_removed_on_drop() {
        let dir = tempfile::TempDir::new().unwrap();
        let artifact = create_artifact(dir.path()).unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());
        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn test_artifact_in_missing_directory_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(create_artifact(&missing).is_err());
    }
}
