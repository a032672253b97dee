//! Core types for the Podium leaderboard.
//!
//! Everything here is plain data shared between the storage, ranking,
//! broadcast and transport crates:
//!
//! - [`UserId`] and [`Identity`] - who is acting, as verified upstream
//! - [`Increment`] - a validated score delta
//! - [`ScoreRecord`] - the single stored row per user
//! - [`RankedEntry`] and [`ScoreboardSnapshot`] - derived ranking views
//! - [`ScoreboardMessage`] - the envelope pushed to real-time observers

mod identity;
mod increment;
mod message;
mod record;
mod snapshot;

pub use identity::{Identity, UserId};
pub use increment::{DEFAULT_MAX_INCREMENT, Increment, ValidationError};
pub use message::{MessageKind, ScoreboardData, ScoreboardMessage};
pub use record::{ScoreRecord, standing_order};
pub use snapshot::{DEFAULT_TOP_K, RankedEntry, ScoreboardSnapshot};
