//! Status command for showing where events are stored and how many there are.

use std::io::Write;

use anyhow::Result;
use sw_core::{EventStore, Persistence};

use crate::Config;

pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &EventStore<P>,
    config: &Config,
) -> Result<()> {
    let events = store.list_events();
    let occurrences: usize = events.iter().map(|event| event.occurrences().len()).sum();

    writeln!(writer, "Since-when status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;
    writeln!(writer, "Events: {}", events.len())?;
    writeln!(writer, "Occurrences: {occurrences}")?;

    let latest = events
        .iter()
        .filter_map(|event| event.last_occurrence().map(|date| (date, event)))
        .max_by_key(|(date, _)| *date);
    if let Some((date, event)) = latest {
        writeln!(writer, "Latest: {} on {date}", event.name())?;
    }

    Ok(())
}
