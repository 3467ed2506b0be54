//! Add command for starting to track a new event.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sw_core::{EventStore, Persistence};

/// Runs the add command, printing the new event's ID.
pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &mut EventStore<P>,
    name: &str,
    on: Option<NaiveDate>,
) -> Result<()> {
    let id = store
        .add_event(name, on)
        .with_context(|| format!("failed to add event {:?}", name.trim()))?;
    writeln!(writer, "{id}")?;
    Ok(())
}
