//! Core domain logic for since-when.
//!
//! This crate contains:
//! - Events: named, recurring happenings and the dates they occurred on
//! - Store: the ordered, persisted collection of events
//! - Stats: time since the last occurrence and the average interval

mod event;
mod persistence;
pub mod stats;
mod store;
mod types;

pub use event::Event;
pub use persistence::{MemoryPersistence, Persistence, PersistenceError};
pub use stats::{EventSummary, StatsError, average_interval, summarize, time_since_last};
pub use store::{EventStore, StoreError};
pub use types::{Days, EventId, EventName, ValidationError};
