//! Application configuration and constants.
//!
//! This module provides:
//! - Setting keys and built-in defaults
//! - The layered settings lookup (per-target over global over built-in)
//! - Resolved per-target configuration
//! - CLI option types and parsing

mod constants;
mod settings;
mod target;
mod types;

// Re-export all constants
pub use constants::*;
pub use settings::Settings;
pub use target::{load_targets, TargetConfig};
pub use types::{LogFormat, LogLevel, Mode, Opt};
