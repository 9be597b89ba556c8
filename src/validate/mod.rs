//! Response validation against configured patterns.
//!
//! This module provides:
//! - grep-style match options
//! - the ordered header/body pattern chain

mod chain;
mod options;

pub use chain::{PatternChain, PatternStep};
pub use options::MatchOptions;
