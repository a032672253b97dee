//! Real-time scoreboard fan-out.
//!
//! - [`SubscriberRegistry`] - the set of connected observers
//! - [`Subscription`] - an observer's receiving end, unregisters on drop
//! - [`Broadcaster`] - builds one snapshot, serializes it once, pushes it to everyone
//! - [`BroadcastTrigger`] - fire-and-forget handle feeding the publish worker

mod broadcaster;
mod error;
mod metrics;
mod registry;
mod subscription;
mod trigger;

pub use broadcaster::{BroadcastConfig, Broadcaster, PublishReport, SnapshotSource};
pub use error::{BroadcastError, DeliveryError};
pub use registry::{Payload, SubscriberRegistry, SubscriptionId};
pub use subscription::Subscription;
pub use trigger::{BroadcastTrigger, UpdateNotifier};
