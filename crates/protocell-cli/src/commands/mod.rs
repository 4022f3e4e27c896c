//! CLI command implementations.

pub mod config;
pub mod init;
pub mod run;
pub mod snapshot;
pub mod stats;
