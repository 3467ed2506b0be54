//! The authoritative collection of tracked events.
//!
//! [`EventStore`] owns every event in insertion order and writes the full set
//! through its [`Persistence`] backend after each change. When a save fails the
//! in-memory state is rolled back, so callers never observe a mutation that was
//! not persisted.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::event::Event;
use crate::persistence::{Persistence, PersistenceError};
use crate::types::{EventId, EventName, ValidationError};

/// Errors from event store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The caller supplied an invalid value.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No event has this ID.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// The event exists but has no occurrence on this date.
    #[error("event {id} has no occurrence on {date}")]
    OccurrenceNotFound { id: EventId, date: NaiveDate },

    /// The persistence backend failed.
    #[error("failed to {action} events")]
    Persistence {
        action: &'static str,
        #[source]
        source: PersistenceError,
    },
}

impl StoreError {
    /// True for both missing events and missing occurrences.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::EventNotFound(_) | Self::OccurrenceNotFound { .. })
    }
}

/// Ordered, persisted collection of events.
pub struct EventStore<P> {
    events: Vec<Event>,
    persistence: P,
}

impl<P: Persistence> EventStore<P> {
    /// Loads existing events from `persistence`.
    pub fn open(mut persistence: P) -> Result<Self, StoreError> {
        let events = persistence
            .load_all()
            .map_err(|source| StoreError::Persistence {
                action: "load",
                source,
            })?;
        tracing::debug!(count = events.len(), "loaded events");
        Ok(Self {
            events,
            persistence,
        })
    }

    /// Creates an event, optionally with its first occurrence.
    pub fn add_event(
        &mut self,
        name: &str,
        initial_occurrence: Option<NaiveDate>,
    ) -> Result<EventId, StoreError> {
        let name = EventName::new(name)?;
        self.ensure_name_available(&name, None)?;

        let mut event = Event::new(name);
        if let Some(date) = initial_occurrence {
            event.insert_occurrence(date);
        }
        let id = event.id().clone();

        let previous = self.events.clone();
        self.events.push(event);
        self.commit(previous)?;
        tracing::info!(%id, "event added");
        Ok(id)
    }

    /// Removes an event and all of its occurrences.
    pub fn delete_event(&mut self, id: &EventId) -> Result<(), StoreError> {
        let index = self.index_of(id)?;
        let previous = self.events.clone();
        self.events.remove(index);
        self.commit(previous)?;
        tracing::info!(%id, "event deleted");
        Ok(())
    }

    pub fn rename_event(&mut self, id: &EventId, new_name: &str) -> Result<(), StoreError> {
        let name = EventName::new(new_name)?;
        let index = self.index_of(id)?;
        if self.events[index].name() == &name {
            return Ok(());
        }
        self.ensure_name_available(&name, Some(id))?;

        let previous = self.events.clone();
        self.events[index].set_name(name);
        self.commit(previous)?;
        tracing::info!(%id, "event renamed");
        Ok(())
    }

    /// Records an occurrence.
    ///
    /// Returns `false` without touching storage when the date was already recorded.
    pub fn add_occurrence(&mut self, id: &EventId, date: NaiveDate) -> Result<bool, StoreError> {
        let index = self.index_of(id)?;
        if self.events[index].occurred_on(date) {
            tracing::debug!(%id, %date, "occurrence already recorded");
            return Ok(false);
        }

        let previous = self.events.clone();
        self.events[index].insert_occurrence(date);
        self.commit(previous)?;
        tracing::info!(%id, %date, "occurrence added");
        Ok(true)
    }

    pub fn remove_occurrence(&mut self, id: &EventId, date: NaiveDate) -> Result<(), StoreError> {
        let index = self.index_of(id)?;
        if !self.events[index].occurred_on(date) {
            return Err(StoreError::OccurrenceNotFound {
                id: id.clone(),
                date,
            });
        }

        let previous = self.events.clone();
        self.events[index].remove_occurrence(date);
        self.commit(previous)?;
        tracing::info!(%id, %date, "occurrence removed");
        Ok(())
    }

    /// All events in insertion order.
    pub fn list_events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id() == id)
    }

    /// Looks up an event by its exact (trimmed) name.
    pub fn find_by_name(&self, name: &str) -> Option<&Event> {
        let name = name.trim();
        self.events
            .iter()
            .find(|event| event.name().as_str() == name)
    }

    /// Names of the events that occurred on each day of a month.
    ///
    /// Days without occurrences are absent. Names within a day follow event
    /// insertion order.
    pub fn events_in_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<BTreeMap<u32, Vec<String>>, StoreError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth { value: month }.into());
        }

        let mut by_day: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for event in &self.events {
            for date in event.occurrences() {
                if date.year() == year && date.month() == month {
                    by_day
                        .entry(date.day())
                        .or_default()
                        .push(event.name().to_string());
                }
            }
        }
        Ok(by_day)
    }

    /// The persistence backend.
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    fn index_of(&self, id: &EventId) -> Result<usize, StoreError> {
        self.events
            .iter()
            .position(|event| event.id() == id)
            .ok_or_else(|| StoreError::EventNotFound(id.clone()))
    }

    fn ensure_name_available(
        &self,
        name: &EventName,
        except: Option<&EventId>,
    ) -> Result<(), ValidationError> {
        let taken = self
            .events
            .iter()
            .any(|event| event.name() == name && Some(event.id()) != except);
        if taken {
            return Err(ValidationError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Saves the current events, restoring `previous` if the save fails.
    fn commit(&mut self, previous: Vec<Event>) -> Result<(), StoreError> {
        if let Err(source) = self.persistence.save_all(&self.events) {
            tracing::warn!(error = %source, "save failed, rolling back");
            self.events = previous;
            return Err(StoreError::Persistence {
                action: "save",
                source,
            });
        }
        Ok(())
    }
}
