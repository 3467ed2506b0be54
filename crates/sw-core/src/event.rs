//! Tracked events and their occurrences.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{EventId, EventName};

/// A named, recurring real-world happening.
///
/// Occurrences are whole calendar dates kept in an ordered set, so recording the
/// same day twice collapses to one occurrence and iteration is always ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    name: EventName,
    #[serde(default)]
    occurrences: BTreeSet<NaiveDate>,
}

impl Event {
    /// Creates a new event with a freshly generated ID and no occurrences.
    pub fn new(name: EventName) -> Self {
        Self {
            id: EventId::generate(),
            name,
            occurrences: BTreeSet::new(),
        }
    }

    /// Rebuilds an event from persisted parts.
    pub fn restore(
        id: EventId,
        name: EventName,
        occurrences: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            id,
            name,
            occurrences: occurrences.into_iter().collect(),
        }
    }

    pub const fn id(&self) -> &EventId {
        &self.id
    }

    pub const fn name(&self) -> &EventName {
        &self.name
    }

    /// Occurrence dates in ascending order.
    pub const fn occurrences(&self) -> &BTreeSet<NaiveDate> {
        &self.occurrences
    }

    /// The most recent occurrence, if any.
    pub fn last_occurrence(&self) -> Option<NaiveDate> {
        self.occurrences.last().copied()
    }

    pub fn occurred_on(&self, date: NaiveDate) -> bool {
        self.occurrences.contains(&date)
    }

    pub(crate) fn set_name(&mut self, name: EventName) {
        self.name = name;
    }

    /// Returns `false` if the date was already recorded.
    pub(crate) fn insert_occurrence(&mut self, date: NaiveDate) -> bool {
        self.occurrences.insert(date)
    }

    /// Returns `false` if the date was not recorded.
    pub(crate) fn remove_occurrence(&mut self, date: NaiveDate) -> bool {
        self.occurrences.remove(&date)
    }
}
