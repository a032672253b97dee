//! Podium node infrastructure.
//!
//! - [`args`] - CLI argument structs
//! - [`config`] - TOML configuration loading and CLI overrides
//! - [`dirs`] - Data directory management
//! - [`logging`] - Logging initialization
//! - [`launch`] - Component wiring and the serve loop
//! - [`cli`] - The `podium` command line

pub mod args;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod dirs;
pub mod launch;
pub mod logging;
pub mod metrics;
