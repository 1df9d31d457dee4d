//! Expose gbook's internal API for use in integration tests. The
//! supported entry point is the `gbook` binary; this API carries no
//! stability promises.
pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod nav;
pub mod search;
pub mod watch;
