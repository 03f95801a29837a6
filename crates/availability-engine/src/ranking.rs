//! Scoring of candidate meeting times.
//!
//! A slot's score rewards the length of the open run starting at it, a match
//! with the requested period, and proximity to the start of the range:
//!
//! ```text
//! score = min(run / 16, 1) + 0.10 * matched + 0.10 * (1 - offset / span)
//! ```
//!
//! clamped to at most 1. The recency term is 0 for a single-day range.

use std::cmp::Ordering;

use crate::calendar::CalendarSnapshot;
use crate::dates::DateRange;
use crate::query::{OpenSlot, TimePreference, TimeSuggestion};
use crate::slot::{Period, SLOT_COUNT};

pub const PREFERENCE_BONUS: f64 = 0.10;
pub const RECENCY_BONUS: f64 = 0.10;

/// Score a single open slot.
pub fn score_slot(
    snapshot: &CalendarSnapshot,
    range: &DateRange,
    open: &OpenSlot,
    preference: TimePreference,
) -> TimeSuggestion {
    let consecutive_hours = snapshot.open_run(open.date, open.slot);
    let base = (consecutive_hours as f64 / SLOT_COUNT as f64).min(1.0);

    let matched = preference.period().filter(|p| *p == open.period);
    let preference_bonus = if matched.is_some() { PREFERENCE_BONUS } else { 0.0 };

    let span = range.span_days();
    let recency_bonus = if span == 0 {
        0.0
    } else {
        (1.0 - range.offset_of(open.date) as f64 / span as f64) * RECENCY_BONUS
    };

    let score = (base + preference_bonus + recency_bonus).clamp(0.0, 1.0);

    TimeSuggestion {
        date: open.date,
        slot: open.slot,
        period: open.period,
        score,
        consecutive_hours,
        reason: reason(consecutive_hours, matched),
    }
}

/// Human-readable justification, e.g.
/// `"8 consecutive hours available, matches afternoon preference"`.
pub fn reason(consecutive_hours: usize, matched: Option<Period>) -> String {
    let unit = if consecutive_hours == 1 { "hour" } else { "hours" };
    let mut text = format!("{} consecutive {} available", consecutive_hours, unit);
    if let Some(period) = matched {
        text.push_str(&format!(", matches {} preference", period));
    }
    text
}

/// Best first; equal scores go to the sooner date, then the earlier slot.
pub fn compare(a: &TimeSuggestion, b: &TimeSuggestion) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.date.cmp(&b.date))
        .then_with(|| a.slot.cmp(&b.slot))
}

/// Sort in rank order and apply the optional cap.
pub fn rank(mut suggestions: Vec<TimeSuggestion>, count: Option<usize>) -> Vec<TimeSuggestion> {
    suggestions.sort_by(compare);
    if let Some(cap) = count {
        suggestions.truncate(cap);
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_mentions_matched_period() {
        assert_eq!(
            reason(8, Some(Period::Afternoon)),
            "8 consecutive hours available, matches afternoon preference"
        );
        assert_eq!(reason(1, None), "1 consecutive hour available");
    }
}
