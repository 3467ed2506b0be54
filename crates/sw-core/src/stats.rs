//! Interval statistics over occurrence dates.
//!
//! Every function here is pure: callers pass the occurrences and the reference
//! date explicitly, and nothing is cached between calls.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::event::Event;
use crate::types::{Days, EventId, EventName};

/// Errors from statistics computation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// An occurrence lies after the reference date.
    #[error("occurrence on {occurrence} is after the reference date {now}")]
    FutureOccurrence {
        occurrence: NaiveDate,
        now: NaiveDate,
    },
}

/// Time elapsed between the latest occurrence and `now`.
///
/// Returns `None` when there are no occurrences, and an error if any occurrence
/// is later than `now`.
pub fn time_since_last<'a, I>(occurrences: I, now: NaiveDate) -> Result<Option<Days>, StatsError>
where
    I: IntoIterator<Item = &'a NaiveDate>,
{
    let mut latest: Option<NaiveDate> = None;
    for &occurrence in occurrences {
        if occurrence > now {
            return Err(StatsError::FutureOccurrence { occurrence, now });
        }
        latest = latest.max(Some(occurrence));
    }
    Ok(latest.map(|last| Days::from_whole((now - last).num_days())))
}

/// Mean gap between consecutive occurrences.
///
/// Input order does not matter and repeated dates count once. Returns `None`
/// when fewer than two distinct dates remain.
pub fn average_interval<'a, I>(occurrences: I) -> Option<Days>
where
    I: IntoIterator<Item = &'a NaiveDate>,
{
    let mut dates: Vec<NaiveDate> = occurrences.into_iter().copied().collect();
    dates.sort_unstable();
    dates.dedup();

    let gaps: Vec<i64> = dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .collect();
    if gaps.is_empty() {
        return None;
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "gap sums and counts are far below 2^52"
    )]
    let mean = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
    Some(Days::from_fraction(mean))
}

/// Display-ready statistics for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub id: EventId,
    pub name: EventName,
    pub occurrence_count: usize,
    pub last_occurrence: Option<NaiveDate>,
    pub since_last: Option<Days>,
    pub average_interval: Option<Days>,
}

impl EventSummary {
    pub fn for_event(event: &Event, now: NaiveDate) -> Result<Self, StatsError> {
        Ok(Self {
            id: event.id().clone(),
            name: event.name().clone(),
            occurrence_count: event.occurrences().len(),
            last_occurrence: event.last_occurrence(),
            since_last: time_since_last(event.occurrences(), now)?,
            average_interval: average_interval(event.occurrences()),
        })
    }
}

/// Summaries for every event, most recently occurred first.
///
/// Events that never occurred sort last. Ties keep the input order.
pub fn summarize(events: &[Event], now: NaiveDate) -> Result<Vec<EventSummary>, StatsError> {
    let mut summaries = events
        .iter()
        .map(|event| EventSummary::for_event(event, now))
        .collect::<Result<Vec<_>, _>>()?;

    summaries.sort_by(|a, b| match (a.since_last, b.since_last) {
        (Some(a), Some(b)) => a.value().total_cmp(&b.value()),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    Ok(summaries)
}
