//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::{Context, bail};
use chrono::{Duration, Local, NaiveDate};
use regex::Regex;
use sw_core::{Days, Event, EventId, EventStore, Persistence};

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").expect("relative date pattern is valid")
});

/// Conservative bound for relative dates (~1000 years in days).
const MAX_RELATIVE_DAYS: i64 = 1000 * 365;

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date string as ISO 8601, a keyword, or a relative offset from `today`.
///
/// Supports:
/// - ISO 8601: "2024-01-15"
/// - Keywords: "today", "yesterday"
/// - Relative: "3 days ago", "1 week ago"
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(date);
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(&s) else {
        bail!(
            "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2024-01-15), 'today', 'yesterday' or relative (e.g., '3 days ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;

    let (max_for_unit, days_per_unit) = match &caps[2] {
        "day" => (MAX_RELATIVE_DAYS, 1),
        "week" => (MAX_RELATIVE_DAYS / 7, 7),
        unit => bail!("Unknown date unit: {unit}"),
    };

    if n > max_for_unit {
        bail!("Relative date value too large: {n} {}", &caps[2]);
    }

    Ok(today - Duration::days(n * days_per_unit))
}

/// Parse a date for recording an occurrence, refusing dates after `today`.
pub fn parse_past_date(s: Option<&str>, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let date = match s {
        Some(s) => parse_date(s, today)?,
        None => today,
    };
    if date > today {
        bail!("{date} is in the future; occurrences can only be recorded up to {today}");
    }
    Ok(date)
}

/// Parse a `YYYY-MM` month.
pub fn parse_month(s: &str) -> anyhow::Result<(i32, u32)> {
    use chrono::Datelike;

    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("invalid month {s:?}, expected YYYY-MM (e.g., 2024-01)"))?;
    Ok((first.year(), first.month()))
}

/// Find an event by exact name, then by ID.
pub fn resolve_event<'a, P: Persistence>(
    store: &'a EventStore<P>,
    reference: &str,
) -> anyhow::Result<&'a Event> {
    if let Some(event) = store.find_by_name(reference) {
        return Ok(event);
    }
    EventId::new(reference.trim())
        .ok()
        .and_then(|id| store.get(&id))
        .with_context(|| format!("no event named or identified by {reference:?}"))
}

/// Formats a day count rounded to whole days, e.g. "1 day" or "7 days".
pub fn format_days(days: Days) -> String {
    let whole = days.whole();
    let unit = if whole == 1 { "day" } else { "days" };
    format!("{whole} {unit}")
}
