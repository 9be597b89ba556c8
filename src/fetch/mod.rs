//! Timed fetching of a target URL.
//!
//! One request per target: the response is captured to a temporary artifact
//! and the wall-clock time of the whole exchange (all attempts, body
//! included) is recorded.

mod artifact;
mod request;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, warn};
use tempfile::NamedTempFile;
use tokio_retry::Retry;
use url::Url;

use crate::error_handling::{categorize_transport_error, get_retry_strategy, TransportError};
use crate::initialization::init_client;

use artifact::{create_artifact, RawResponse};
pub use request::ClientOptions;

/// Outcome of one timed fetch.
#[derive(Debug)]
pub struct FetchResult {
    /// Wall-clock time of the whole exchange
    pub elapsed: Duration,
    /// Whether the client completed without error (independent of HTTP status
    /// unless the `fail` client option is set)
    pub transport_ok: bool,
    /// Captured response; `None` if the artifact could not be created.
    /// Deleted when the result is dropped.
    pub artifact: Option<NamedTempFile>,
}

impl FetchResult {
    pub fn artifact_path(&self) -> Option<&Path> {
        self.artifact.as_ref().map(NamedTempFile::path)
    }
}

/// Issues timed requests and captures their responses.
#[derive(Debug, Clone)]
pub struct Fetcher {
    artifact_dir: PathBuf,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl Fetcher {
    /// Creates a fetcher whose artifacts live in `artifact_dir`.
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Fetcher {
            artifact_dir: artifact_dir.into(),
        }
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    /// Fetches `url` (POSTing `post_data` if given) and captures the response.
    ///
    /// Never fails: transport problems show up as `transport_ok == false`,
    /// and an artifact that cannot be created as `artifact == None` (in which
    /// case no request is made).
    pub async fn fetch(
        &self,
        url: &str,
        post_data: Option<&str>,
        timeout_secs: f64,
        options: &ClientOptions,
    ) -> FetchResult {
        let mut artifact = match create_artifact(&self.artifact_dir) {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    "Cannot create response artifact in {}: {}",
                    self.artifact_dir.display(),
                    e
                );
                return FetchResult {
                    elapsed: Duration::ZERO,
                    transport_ok: false,
                    artifact: None,
                };
            }
        };

        let start = Instant::now();
        let outcome = fetch_with_retries(url, post_data, timeout_secs, options).await;
        let elapsed = start.elapsed();

        let transport_ok = match outcome {
            Ok(response) => match response.write_to(artifact.as_file_mut()) {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        "Cannot write response for {} to {}: {}",
                        url,
                        artifact.path().display(),
                        e
                    );
                    false
                }
            },
            Err(e) => {
                warn!("{} for {}: {}", categorize_transport_error(&e), url, e);
                false
            }
        };
        debug!(
            "Fetched {} in {:.3}s (transport ok: {})",
            url,
            elapsed.as_secs_f64(),
            transport_ok
        );

        FetchResult {
            elapsed,
            transport_ok,
            artifact: Some(artifact),
        }
    }
}

async fn fetch_with_retries(
    url: &str,
    post_data: Option<&str>,
    timeout_secs: f64,
    options: &ClientOptions,
) -> Result<RawResponse, TransportError> {
    let url = Url::parse(url)?;
    let client = init_client(timeout_secs, options)?;

    let client = &client;
    let url = &url;
    Retry::spawn(get_retry_strategy(options.retries), move || {
        exchange(client, url, post_data, options)
    })
    .await
}

async fn exchange(
    client: &reqwest::Client,
    url: &Url,
    post_data: Option<&str>,
    options: &ClientOptions,
) -> Result<RawResponse, TransportError> {
    let builder = match post_data {
        Some(data) => client
            .post(url.clone())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(data.to_string()),
        None => client.get(url.clone()),
    };
    let response = options.apply_to_request_builder(builder).send().await?;

    let status = response.status();
    if options.fail_on_status && (status.is_client_error() || status.is_server_error()) {
        return Err(TransportError::Status(status));
    }

    let mut raw = RawResponse::head(&response);
    raw.body = response.bytes().await?.to_vec();
    Ok(raw)
}
