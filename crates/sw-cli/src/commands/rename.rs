//! Rename command.

use std::io::Write;

use anyhow::Result;
use sw_core::{EventStore, Persistence};

use super::util::resolve_event;

pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &mut EventStore<P>,
    reference: &str,
    new_name: &str,
) -> Result<()> {
    let event = resolve_event(store, reference)?;
    let (id, old_name) = (event.id().clone(), event.name().clone());

    store.rename_event(&id, new_name)?;
    writeln!(writer, "Renamed {old_name} to {}", new_name.trim())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use sw_core::MemoryPersistence;

    #[test]
    fn test_rename_updates_name() {
        let mut store = EventStore::open(MemoryPersistence::new()).unwrap();
        store.add_event("Oil change", None).unwrap();

        let mut output = Vec::new();
        run(&mut output, &mut store, "Oil change", " Changed oil ").unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Renamed Oil change to Changed oil\n"
        );
        assert!(store.find_by_name("Changed oil").is_some());
        assert!(store.find_by_name("Oil change").is_none());
    }

    #[test]
    fn test_rename_rejects_taken_name() {
        let mut store = EventStore::open(MemoryPersistence::new()).unwrap();
        store.add_event("Oil change", None).unwrap();
        store.add_event("Haircut", None).unwrap();

        let mut output = Vec::new();
        let err = run(&mut output, &mut store, "Oil change", "Haircut").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
