//! forklift-console library root.
//!
//! Re-exports internal modules so that integration tests can exercise the
//! config layer and action replay without going through the binary.

pub mod config;
pub mod logging;
pub mod replay;
