//! Delete command. Removes the event immediately; there is no confirmation.

use std::io::Write;

use anyhow::Result;
use sw_core::{EventStore, Persistence};

use super::util::resolve_event;

pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &mut EventStore<P>,
    reference: &str,
) -> Result<()> {
    let event = resolve_event(store, reference)?;
    let (id, name) = (event.id().clone(), event.name().clone());
    let count = event.occurrences().len();

    store.delete_event(&id)?;
    let noun = if count == 1 { "occurrence" } else { "occurrences" };
    writeln!(writer, "Deleted {name} ({count} {noun})")?;
    Ok(())
}
