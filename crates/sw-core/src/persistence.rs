//! Storage seam for the event store.

use std::error::Error;

use crate::event::Event;

/// Error returned by a [`Persistence`] backend.
pub type PersistenceError = Box<dyn Error + Send + Sync + 'static>;

/// Loads and saves the complete set of events.
///
/// The store calls [`load_all`](Persistence::load_all) once when it is opened and
/// [`save_all`](Persistence::save_all) synchronously after every mutation. Backends
/// must preserve the order of the events they are given.
pub trait Persistence {
    fn load_all(&mut self) -> Result<Vec<Event>, PersistenceError>;

    fn save_all(&mut self, events: &[Event]) -> Result<(), PersistenceError>;
}

/// Keeps the last saved snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    events: Vec<Event>,
    saves: usize,
}

impl MemoryPersistence {
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            saves: 0,
        }
    }

    /// Starts with `events` already "on disk".
    pub const fn with_events(events: Vec<Event>) -> Self {
        Self { events, saves: 0 }
    }

    /// The most recently saved snapshot.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// How many times `save_all` has been called.
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl Persistence for MemoryPersistence {
    fn load_all(&mut self) -> Result<Vec<Event>, PersistenceError> {
        Ok(self.events.clone())
    }

    fn save_all(&mut self, events: &[Event]) -> Result<(), PersistenceError> {
        self.events = events.to_vec();
        self.saves += 1;
        Ok(())
    }
}
