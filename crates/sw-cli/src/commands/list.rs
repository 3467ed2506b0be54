//! List command: every event with time since last occurrence and average interval.

use std::io::{self, Write};

use anyhow::Result;
use chrono::NaiveDate;
use sw_core::{EventStore, EventSummary, Persistence, summarize};

use super::util::format_days;

/// Runs the list command.
///
/// Events appear in creation order unless `recent` is set, in which case the
/// most recently occurred come first.
pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &EventStore<P>,
    today: NaiveDate,
    recent: bool,
    json: bool,
) -> Result<()> {
    let summaries = if recent {
        summarize(store.list_events(), today)?
    } else {
        store
            .list_events()
            .iter()
            .map(|event| EventSummary::for_event(event, today))
            .collect::<Result<Vec<_>, _>>()?
    };

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summaries)?)?;
    } else {
        write_summaries(writer, &summaries)?;
    }
    Ok(())
}

/// Writes summaries as an aligned table.
pub fn write_summaries<W: Write>(writer: &mut W, summaries: &[EventSummary]) -> io::Result<()> {
    if summaries.is_empty() {
        writeln!(writer, "No events tracked yet.")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "Hint: Run 'sw add <name>' to start tracking something."
        )?;
        return Ok(());
    }

    writeln!(writer, "{:<24}  {:<13}  AVERAGE", "EVENT", "SINCE")?;
    writeln!(
        writer,
        "────────────────────────  ─────────────  ────────────"
    )?;
    for summary in summaries {
        let since = summary
            .since_last
            .map_or_else(|| "never".to_string(), |days| format!("{} ago", format_days(days)));
        let average = summary
            .average_interval
            .map_or_else(|| "-".to_string(), |days| format!("{} avg", format_days(days)));
        writeln!(writer, "{:<24}  {since:<13}  {average}", summary.name.as_str())?;
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

    fn sample_store() -> EventStore<MemoryPersistence> {
        let mut store = EventStore::open(MemoryPersistence::new()).unwrap();
        store.add_event("Changed air filter", None).unwrap();
        let plants = store
            .add_event("Water plants", Some(date(2024, 1, 1)))
            .unwrap();
        store.add_occurrence(&plants, date(2024, 1, 8)).unwrap();
        store.add_occurrence(&plants, date(2024, 1, 15)).unwrap();
        store
            .add_event("Paid rent", Some(date(2024, 1, 19)))
            .unwrap();
        store
    }

    fn render(store: &EventStore<MemoryPersistence>, recent: bool) -> String {
        let mut output = Vec::new();
        run(&mut output, store, date(2024, 1, 20), recent, false).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_list_empty_store() {
        let store = EventStore::open(MemoryPersistence::new()).unwrap();
        assert_snapshot!(render(&store, false));
    }

    #[test]
    fn test_list_in_creation_order() {
        let store = sample_store();
        assert_snapshot!(render(&store, false));
    }

    #[test]
    fn test_list_most_recent_first() {
        let store = sample_store();
        let output = render(&store, true);
        let names: Vec<_> = output
            .lines()
            .skip(2)
            .map(|line| line.split("  ").next().unwrap().trim())
            .collect();
        assert_eq!(names, vec!["Paid rent", "Water plants", "Changed air filter"]);
    }

    #[test]
    fn test_list_json_keeps_fractional_values() {
        let mut store = EventStore::open(MemoryPersistence::new()).unwrap();
        let id = store
            .add_event("Haircut", Some(date(2024, 1, 1)))
            .unwrap();
        store.add_occurrence(&id, date(2024, 1, 2)).unwrap();
        store.add_occurrence(&id, date(2024, 1, 4)).unwrap();

        let mut output = Vec::new();
        run(&mut output, &store, date(2024, 1, 10), false, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        let entry = &value[0];
        assert_eq!(entry["name"], "Haircut");
        assert_eq!(entry["occurrence_count"], 3);
        assert_eq!(entry["last_occurrence"], "2024-01-04");
        assert_eq!(entry["since_last"], 6.0);
        assert_eq!(entry["average_interval"], 1.5);
    }

    #[test]
    fn test_list_fails_on_future_occurrence() {
        let mut store = EventStore::open(MemoryPersistence::new()).unwrap();
        store
            .add_event("Paid rent", Some(date(2024, 2, 1)))
            .unwrap();

        let mut output = Vec::new();
        let err = run(&mut output, &store, date(2024, 1, 20), false, false).unwrap_err();
        assert!(err.to_string().contains("after the reference date"));
    }
}
