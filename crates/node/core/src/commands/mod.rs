//! Node commands
//!
//! - `node` loads the configuration, wires the service and serves until Ctrl-C
//! - `config` creates or prints the configuration file

pub mod config;
pub mod node;
