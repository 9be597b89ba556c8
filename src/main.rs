//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `http_loadtime` library that handles:
//! - Command-line argument parsing (mode and logging flags)
//! - Logger initialization
//! - Exit codes
//!
//! All settings come from the environment the collector runs us in; all core
//! functionality is implemented in the library crate.

use anyhow::Result;
use clap::Parser;
use std::process;

use http_loadtime::initialization::init_logger_with;
use http_loadtime::{run_mode, Fetcher, Opt, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    // A logger failure must not change what the collector sees on stdout
    if let Err(e) = init_logger_with(opt.log_level.clone().into(), opt.log_format.clone()) {
        eprintln!("http_loadtime: {}", e);
    }

    let settings = Settings::from_env();
    let fetcher = Fetcher::default();

    let mut out = std::io::stdout().lock();
    match run_mode(&mut out, opt.mode(), &settings, &fetcher).await {
        Ok(0) => Ok(()),
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("http_loadtime error: {:#}", e);
            process::exit(1);
        }
    }
}
