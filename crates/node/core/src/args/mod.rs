//! CLI argument structs.
//!
//! Every override is optional: a flag that is not given leaves the value from
//! the config file untouched (see [`PodiumConfig::apply_cli_args`]).
//!
//! [`PodiumConfig::apply_cli_args`]: crate::config::PodiumConfig::apply_cli_args

mod datadir;
mod http;
mod log;
mod scoreboard;
mod storage;

pub use datadir::DataDirArgs;
pub use http::HttpArgs;
pub use log::LogArgs;
pub use scoreboard::ScoreboardArgs;
pub use storage::StorageArgs;
