//! Show command: one event in detail.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use sw_core::{EventStore, EventSummary, Persistence};

use super::util::{format_days, resolve_event};

/// Runs the show command.
pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &EventStore<P>,
    reference: &str,
    today: NaiveDate,
) -> Result<()> {
    let event = resolve_event(store, reference)?;
    let summary = EventSummary::for_event(event, today)?;

    writeln!(writer, "{}", summary.name)?;
    writeln!(writer, "ID:       {}", summary.id)?;
    match (summary.last_occurrence, summary.since_last) {
        (Some(last), Some(since)) => {
            writeln!(writer, "Last:     {last} ({} ago)", format_days(since))?;
        }
        _ => writeln!(writer, "Last:     never")?,
    }
    match summary.average_interval {
        Some(average) => writeln!(writer, "Average:  every {}", format_days(average))?,
        None => writeln!(writer, "Average:  -")?,
    }

    writeln!(writer, "Occurrences ({}):", summary.occurrence_count)?;
    for date in event.occurrences() {
        writeln!(writer, "  {date}")?;
    }
    Ok(())
}
