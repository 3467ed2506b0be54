//! Storage layer for since-when.
//!
//! Persists events and their occurrences using `rusqlite` and plugs into
//! [`sw_core::EventStore`] through the [`Persistence`] trait.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can be moved to another thread but not shared between threads
//! without external synchronization.
//!
//! # Schema
//!
//! ## Ordering
//!
//! `events.position` records the store's insertion order. Positions are rewritten
//! on every save, so they are always dense and start at zero.
//!
//! ## Date Format
//!
//! Occurrence dates are stored as TEXT in ISO 8601 calendar format (`2024-01-15`).
//! Lexicographic ordering matches chronological ordering.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use sw_core::{Event, EventId, EventName, Persistence, PersistenceError};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse an occurrence date.
    #[error("invalid occurrence date for event {event_id}: {date}")]
    DateParse {
        event_id: String,
        date: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored event row fails validation.
    #[error("invalid event data for {event_id}: {message}")]
    InvalidEventData { event_id: String, message: String },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                position INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_position ON events(position);

            -- date: ISO 8601 calendar date (e.g., '2024-01-15')
            CREATE TABLE IF NOT EXISTS occurrences (
                event_id TEXT NOT NULL,
                date TEXT NOT NULL,
                PRIMARY KEY (event_id, date),
                FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_occurrences_date ON occurrences(date);
            ",
        )?;
        Ok(())
    }

    /// Loads all events in stored order, each with its occurrences ascending.
    pub fn load_events(&self) -> Result<Vec<Event>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM events ORDER BY position ASC, id ASC")?;
        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let name: String = row.get(1)?;
            Ok((id, name))
        })?;
        let mut headers = Vec::new();
        for row in rows {
            headers.push(row?);
        }

        let mut dates = self.occurrences_by_event()?;

        let mut events = Vec::with_capacity(headers.len());
        for (id, name) in headers {
            let occurrences = dates.remove(&id).unwrap_or_default();
            let event_id = EventId::new(id.as_str()).map_err(|e| DbError::InvalidEventData {
                event_id: id.clone(),
                message: e.to_string(),
            })?;
            let event_name = EventName::new(&name).map_err(|e| DbError::InvalidEventData {
                event_id: id.clone(),
                message: e.to_string(),
            })?;
            events.push(Event::restore(event_id, event_name, occurrences));
        }
        tracing::debug!(count = events.len(), "loaded events from database");
        Ok(events)
    }

    fn occurrences_by_event(&self) -> Result<HashMap<String, Vec<NaiveDate>>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT event_id, date
            FROM occurrences
            ORDER BY event_id ASC, date ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            let event_id: String = row.get(0)?;
            let date: String = row.get(1)?;
            Ok((event_id, date))
        })?;
        let mut by_event: HashMap<String, Vec<NaiveDate>> = HashMap::new();
        for row in rows {
            let (event_id, date) = row?;
            let parsed = parse_date(&date, &event_id)?;
            by_event.entry(event_id).or_default().push(parsed);
        }
        Ok(by_event)
    }

    /// Replaces the stored events with `events`, in one transaction.
    pub fn replace_events(&mut self, events: &[Event]) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM occurrences", [])?;
        tx.execute("DELETE FROM events", [])?;
        {
            let mut event_stmt =
                tx.prepare("INSERT INTO events (id, name, position) VALUES (?, ?, ?)")?;
            let mut occurrence_stmt =
                tx.prepare("INSERT INTO occurrences (event_id, date) VALUES (?, ?)")?;
            let mut position: i64 = 0;
            for event in events {
                event_stmt.execute(params![
                    event.id().as_str(),
                    event.name().as_str(),
                    position
                ])?;
                position += 1;
                for date in event.occurrences() {
                    occurrence_stmt.execute(params![event.id().as_str(), format_date(*date)])?;
                }
            }
        }
        tx.commit()?;
        tracing::debug!(count = events.len(), "saved events to database");
        Ok(())
    }
}

impl Persistence for Database {
    fn load_all(&mut self) -> Result<Vec<Event>, PersistenceError> {
        Ok(self.load_events()?)
    }

    fn save_all(&mut self, events: &[Event]) -> Result<(), PersistenceError> {
        self.replace_events(events)?;
        Ok(())
    }
}

fn parse_date(date: &str, event_id: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|source| DbError::DateParse {
        event_id: event_id.to_string(),
        date: date.to_string(),
        source,
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
