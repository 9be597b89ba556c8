//! Error handling.
//!
//! This module provides:
//! - Error type definitions
//! - Transport error categorization for logging
//! - Retry strategy configuration
//!
//! Only [`ConfigError`] aborts a run. Transport, storage, and pattern failures
//! are recovered per target and turned into override values.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_transport_error, get_retry_strategy};
pub use types::{ConfigError, InitializationError, TransportError, TransportErrorKind};
