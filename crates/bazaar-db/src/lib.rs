//! Bazaar data layer.
//!
//! Document persistence (Redis or in-memory) plus the in-process change
//! feed that turns successful writes into real-time notifications.

pub mod broadcast;
pub mod client;
pub mod event;
pub mod memory;
pub mod store;

pub use broadcast::{
    BroadcastConfig, BroadcastHub, ChangePublisher, ObserverId, RecordingPublisher, Subscription,
};
pub use client::RedisStore;
pub use event::{ChangeAction, ChangeEvent, EntityType};
pub use memory::MemoryStore;
pub use store::{Db, DbError, DbResult, Document, DocumentStore};
