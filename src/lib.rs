//! http_loadtime library: page load time probe for munin-style collectors
//!
//! For every configured target the probe issues one timed HTTP request,
//! optionally validates the response headers and body against an ordered
//! chain of patterns, and reports a single load time per target. Failures are
//! reported as configurable override values instead of aborting the run.
//!
//! # Example
//!
//! ```no_run
//! use http_loadtime::{run_fetch, Fetcher, Settings};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let settings = Settings::from_pairs([
//!     ("names", "home"),
//!     ("url_home", "https://example.com/"),
//!     ("regex_body_1_home", "Example Domain"),
//! ]);
//!
//! let mut out = std::io::stdout().lock();
//! run_fetch(&mut out, &settings, &Fetcher::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Fetching requires a Tokio runtime. Targets are probed sequentially.

pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod loadtime;
mod report;
mod response;
mod run;
mod validate;

// Re-export public API
pub use config::{load_targets, LogFormat, LogLevel, Mode, Opt, Settings, TargetConfig};
pub use error_handling::{ConfigError, InitializationError, TransportError, TransportErrorKind};
pub use fetch::{ClientOptions, FetchResult, Fetcher};
pub use loadtime::{resolve, LoadTime};
pub use report::{field_name, write_config, write_value, GraphInfo};
pub use response::SplitResponse;
pub use run::{
    check_capabilities, probe_target, run_autoconf, run_config, run_fetch, run_mode, Capability,
    EXIT_CONFIG_ERROR,
};
pub use validate::{MatchOptions, PatternChain, PatternStep};
