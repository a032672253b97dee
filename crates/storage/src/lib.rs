//! Persistent score state.
//!
//! The [`ScoreStore`] trait is the only write path for scores; the
//! [`UserDirectory`] trait resolves display names for ranked entries.
//! Two backends implement both:
//!
//! - [`MemoryStore`] - lock-per-user in-memory maps, for tests and ephemeral runs
//! - [`RedbStore`] - ACID persistence on the redb embedded database

mod error;
mod memory;
mod redb_store;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use redb_store::RedbStore;
pub use traits::{ScoreStore, UserDirectory};
