//! Log and unlog commands for recording and removing occurrences.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use sw_core::{EventStore, Persistence};

use super::util::resolve_event;

/// Records that the event happened on `date`.
pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &mut EventStore<P>,
    reference: &str,
    date: NaiveDate,
) -> Result<()> {
    let event = resolve_event(store, reference)?;
    let (id, name) = (event.id().clone(), event.name().clone());

    if store.add_occurrence(&id, date)? {
        writeln!(writer, "Recorded {name} on {date}")?;
    } else {
        writeln!(writer, "{name} was already recorded on {date}")?;
    }
    Ok(())
}

/// Removes the occurrence of the event on `date`.
pub fn unlog<W: Write, P: Persistence>(
    writer: &mut W,
    store: &mut EventStore<P>,
    reference: &str,
    date: NaiveDate,
) -> Result<()> {
    let event = resolve_event(store, reference)?;
    let (id, name) = (event.id().clone(), event.name().clone());

    store.remove_occurrence(&id, date)?;
    writeln!(writer, "Removed {name} on {date}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use sw_core::MemoryPersistence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut output = Vec::new();
        f(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_log_records_and_reports_duplicates() {
        let mut store = EventStore::open(MemoryPersistence::new()).unwrap();
        store.add_event("Paid rent", None).unwrap();

        let first = render(|out| run(out, &mut store, "Paid rent", date(2024, 2, 1)));
        assert_eq!(first, "Recorded Paid rent on 2024-02-01\n");

        let again = render(|out| run(out, &mut store, "Paid rent", date(2024, 2, 1)));
        assert_eq!(again, "Paid rent was already recorded on 2024-02-01\n");

        let event = store.find_by_name("Paid rent").unwrap();
        assert_eq!(event.occurrences().len(), 1);
    }

    #[test]
    fn test_unlog_removes_occurrence() {
        let mut store = EventStore::open(MemoryPersistence::new()).unwrap();
        store
            .add_event("Haircut", Some(date(2024, 1, 5)))
            .unwrap();

        let removed = render(|out| unlog(out, &mut store, "Haircut", date(2024, 1, 5)));
        assert_eq!(removed, "Removed Haircut on 2024-01-05\n");
        assert!(store.find_by_name("Haircut").unwrap().occurrences().is_empty());

        let mut output = Vec::new();
        let err = unlog(&mut output, &mut store, "Haircut", date(2024, 1, 5)).unwrap_err();
        assert!(err.to_string().contains("has no occurrence on 2024-01-05"));
    }

    #[test]
    fn test_log_unknown_event_fails() {
        let mut store = EventStore::open(MemoryPersistence::new()).unwrap();
        let mut output = Vec::new();
        assert!(run(&mut output, &mut store, "Haircut", date(2024, 1, 5)).is_err());
    }
}
