//! Captured response handling.

mod split;

pub use split::SplitResponse;
