//! Mode dispatch: `autoconf`, `config`, and the default fetch.
//!
//! Targets are probed one after another in declaration order. Each target's
//! response artifact is dropped (and deleted) before the next one starts.

mod autoconf;

use std::io::Write;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::{load_targets, Mode, Settings, TargetConfig};
use crate::error_handling::ConfigError;
use crate::fetch::Fetcher;
use crate::loadtime::{resolve, LoadTime};
use crate::report::{write_config, write_value, GraphInfo};

pub use autoconf::{check_capabilities, run_autoconf, Capability};

/// Exit code for configuration errors.
pub const EXIT_CONFIG_ERROR: i32 = 1;

/// Fetches one target and resolves its load time.
pub async fn probe_target(fetcher: &Fetcher, target: &TargetConfig) -> LoadTime {
    let fetch = fetcher
        .fetch(
            &target.url,
            target.post_data.as_deref(),
            target.timeout,
            &target.client_options,
        )
        .await;
    let value = resolve(&fetch, target);
    info!("Target {} ({}): {:?}", target.name, target.url, value);
    value
}

/// Prints graph metadata and the per-target declarations.
///
/// # Errors
///
/// Returns [`ConfigError`] (wrapped) when no target names are configured,
/// or an I/O error if writing fails.
pub fn run_config<W: Write>(out: &mut W, settings: &Settings) -> Result<()> {
    let targets = load_targets(settings)?;
    let graph = GraphInfo::from_settings(settings);
    write_config(out, &graph, &targets).context("Failed to write config output")?;
    Ok(())
}

/// Probes every target and prints one value line per target.
///
/// # Errors
///
/// Returns [`ConfigError`] (wrapped) when no target names are configured,
/// or an I/O error if writing fails. Failures of individual targets are
/// reported as values, never as errors.
pub async fn run_fetch<W: Write>(
    out: &mut W,
    settings: &Settings,
    fetcher: &Fetcher,
) -> Result<()> {
    let targets = load_targets(settings)?;
    for (i, target) in targets.iter().enumerate() {
        let value = probe_target(fetcher, target).await;
        write_value(out, i + 1, &value).context("Failed to write value output")?;
    }
    out.flush().context("Failed to flush output")?;
    Ok(())
}

/// Runs `mode` and returns the process exit code.
///
/// A missing name list is printed to `out` and yields [`EXIT_CONFIG_ERROR`];
/// any other error is returned.
pub async fn run_mode<W: Write>(
    out: &mut W,
    mode: Mode,
    settings: &Settings,
    fetcher: &Fetcher,
) -> Result<i32> {
    debug!("Running in {} mode", mode.as_ref());
    let result = match mode {
        Mode::Autoconf => {
            return run_autoconf(out, fetcher).context("Failed to write autoconf output")
        }
        Mode::Config => run_config(out, settings),
        Mode::Fetch => run_fetch(out, settings, fetcher).await,
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => match e.downcast_ref::<ConfigError>() {
            Some(config_error) => {
                writeln!(out, "Error: {}", config_error)?;
                Ok(EXIT_CONFIG_ERROR)
            }
            None => Err(e),
        },
    }
}
