//! The score mutation path and scoreboard queries.
//!
//! [`ScoreService`] is the only writer of scores. It validates the raw
//! increment, applies it atomically through the [`ScoreStore`], computes the
//! new rank and hands a publish to the broadcaster without waiting on it.
//!
//! [`ScoreStore`]: podium_storage::ScoreStore

mod error;
mod metrics;
mod service;
mod validate;

pub use error::ServiceError;
pub use service::{ScoreService, ScoreUpdate, ServiceConfig};
pub use validate::parse_increment;
