//! Month command: which events happened on which day.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sw_core::{EventStore, Persistence};

/// Runs the month command for `year`/`month`.
pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &EventStore<P>,
    year: i32,
    month: u32,
) -> Result<()> {
    let by_day = store.events_in_month(year, month)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("{year}-{month:02} is not a valid month"))?;

    writeln!(writer, "{}", first.format("%B %Y"))?;
    if by_day.is_empty() {
        writeln!(writer, "No occurrences this month.")?;
        return Ok(());
    }

    for (day, names) in &by_day {
        writeln!(writer, "{day:>2}  {}", names.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use sw_core::MemoryPersistence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn render(store: &EventStore<MemoryPersistence>, year: i32, month: u32) -> String {
        let mut output = Vec::new();
        run(&mut output, store, year, month).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_month_groups_events_by_day() {
        let mut store = EventStore::open(MemoryPersistence::new()).unwrap();
        let pooper = store
            .add_event("Pooper empty", Some(date(2023, 4, 1)))
            .unwrap();
        store
            .add_event("Propane tank full", Some(date(2023, 4, 12)))
            .unwrap();
        store.add_occurrence(&pooper, date(2023, 4, 6)).unwrap();
        store.add_occurrence(&pooper, date(2023, 4, 12)).unwrap();
        store.add_occurrence(&pooper, date(2023, 5, 2)).unwrap();

        assert_snapshot!(render(&store, 2023, 4));
    }

    #[test]
    fn test_month_without_occurrences() {
        let store = EventStore::open(MemoryPersistence::new()).unwrap();
        let output = render(&store, 2024, 2);
        assert_eq!(output, "February 2024\nNo occurrences this month.\n");
    }

    #[test]
    fn test_month_rejects_invalid_month() {
        let store = EventStore::open(MemoryPersistence::new()).unwrap();
        let mut output = Vec::new();
        assert!(run(&mut output, &store, 2024, 13).is_err());
    }
}
