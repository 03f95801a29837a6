//! The availability query engine.
//!
//! Holds one calendar snapshot and answers [`Query`]s against it. Every query
//! is validated before any date is walked; a valid query that matches nothing
//! returns an empty result with remediation hints rather than an error.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::calendar::CalendarSnapshot;
use crate::dates::DateRange;
use crate::error::Result;
use crate::hints::{self, HintContext};
use crate::query::{
    Intent, OpenSlot, Query, QueryItems, QueryResult, SlotDuration, TimePreference,
};
use crate::ranking;

/// Answers availability queries against a calendar snapshot.
///
/// The snapshot is never modified. [`update_data`](Self::update_data)
/// replaces it wholesale; callers that share an engine across threads should
/// hand each query a reference from [`snapshot_handle`](Self::snapshot_handle).
#[derive(Debug, Clone, Default)]
pub struct AvailabilityQueryEngine {
    snapshot: Arc<CalendarSnapshot>,
}

impl AvailabilityQueryEngine {
    pub fn new(snapshot: CalendarSnapshot) -> AvailabilityQueryEngine {
        AvailabilityQueryEngine {
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn snapshot(&self) -> &CalendarSnapshot {
        &self.snapshot
    }

    /// Shared reference to the current snapshot.
    pub fn snapshot_handle(&self) -> Arc<CalendarSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Replace the snapshot used by subsequent queries, returning the old one.
    pub fn update_data(&mut self, snapshot: CalendarSnapshot) -> Arc<CalendarSnapshot> {
        debug!(
            owner = %snapshot.owner_id,
            days = snapshot.days.len(),
            "replacing calendar snapshot"
        );
        std::mem::replace(&mut self.snapshot, Arc::new(snapshot))
    }

    /// Run a query.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidDate` if either bound is not a `YYYY-MM-DD`
    /// date, `EngineError::EndBeforeStart` if the range is reversed, and
    /// `EngineError::RangeTooLong` if it covers more than 90 dates.
    pub fn execute(&self, query: &Query) -> Result<QueryResult> {
        let range = DateRange::parse(&query.start_date, &query.end_date).inspect_err(|e| {
            warn!(intent = %query.intent, error = %e, "rejected availability query");
        })?;

        let snapshot = self.snapshot.as_ref();
        let (results, suggestions) = match query.intent {
            Intent::FindDays => find_days(snapshot, &range, query),
            Intent::FindSlots => find_slots(snapshot, &range, query),
            Intent::SuggestTimes => suggest_times(snapshot, &range, query),
        };

        debug!(
            intent = %query.intent,
            start = %range.start(),
            end = %range.end(),
            items = results.len(),
            "executed availability query"
        );

        Ok(QueryResult {
            intent: query.intent,
            results,
            query: query.clone(),
            suggestions,
        })
    }
}

type Handled = (QueryItems, Option<Vec<String>>);

fn cap<T>(mut items: Vec<T>, count: Option<usize>) -> Vec<T> {
    if let Some(cap) = count {
        items.truncate(cap);
    }
    items
}

fn find_days(snapshot: &CalendarSnapshot, range: &DateRange, query: &Query) -> Handled {
    let open: Vec<NaiveDate> = range
        .days()
        .filter(|date| snapshot.is_fully_open(*date))
        .collect();
    let total = open.len();
    let days = cap(open, query.count);

    // Preference and duration do not narrow a whole-day search.
    let suggestions = days.is_empty().then(|| {
        hints::hints(&HintContext {
            unfiltered_total: total,
            prefiltered_total: total,
            time_preference: TimePreference::Any,
            duration: SlotDuration::OneHour,
            count: query.count,
        })
    });

    (QueryItems::Days(days), suggestions)
}

fn find_slots(snapshot: &CalendarSnapshot, range: &DateRange, query: &Query) -> Handled {
    let filtered = open_slots(snapshot, range, query.time_preference, query.duration);
    let total = filtered.len();
    let slots = cap(filtered, query.count);

    let suggestions = slots
        .is_empty()
        .then(|| empty_slot_hints(snapshot, range, query, total));

    (QueryItems::Slots(slots), suggestions)
}

fn suggest_times(snapshot: &CalendarSnapshot, range: &DateRange, query: &Query) -> Handled {
    let universe = open_slots(snapshot, range, query.time_preference, query.duration);
    let total = universe.len();

    let scored = universe
        .iter()
        .map(|open| ranking::score_slot(snapshot, range, open, query.time_preference))
        .collect();
    let ranked = ranking::rank(scored, query.count);

    let suggestions = ranked
        .is_empty()
        .then(|| empty_slot_hints(snapshot, range, query, total));

    (QueryItems::Suggestions(ranked), suggestions)
}

fn empty_slot_hints(
    snapshot: &CalendarSnapshot,
    range: &DateRange,
    query: &Query,
    prefiltered_total: usize,
) -> Vec<String> {
    let unfiltered_total =
        open_slots(snapshot, range, TimePreference::Any, SlotDuration::OneHour).len();
    hints::hints(&HintContext {
        unfiltered_total,
        prefiltered_total,
        time_preference: query.time_preference,
        duration: query.duration,
        count: query.count,
    })
}

/// Open slots in date-then-time order, restricted to the preference's period
/// and to starts with at least `duration` contiguous open hours.
fn open_slots(
    snapshot: &CalendarSnapshot,
    range: &DateRange,
    preference: TimePreference,
    duration: SlotDuration,
) -> Vec<OpenSlot> {
    let open: Vec<OpenSlot> = range
        .days()
        .flat_map(|date| {
            let blocked = snapshot.blocked_mask(date);
            preference
                .slots()
                .iter()
                .filter(move |slot| !blocked.is_blocked(**slot))
                .map(move |slot| OpenSlot::new(date, *slot))
        })
        .collect();

    if duration.is_multi_hour() {
        filter_by_duration(snapshot, open, duration)
    } else {
        open
    }
}

/// Keep slots followed by enough open hours, counting the slot itself, to
/// cover `duration` without crossing a blocked slot or the end of the day.
fn filter_by_duration(
    snapshot: &CalendarSnapshot,
    slots: Vec<OpenSlot>,
    duration: SlotDuration,
) -> Vec<OpenSlot> {
    let needed = duration.hours();
    slots
        .into_iter()
        .filter(|open| snapshot.open_run(open.date, open.slot) >= needed)
        .collect()
}
