//! Remediation text for queries that matched nothing.

use crate::query::{SlotDuration, TimePreference};

pub const WIDEN_RANGE: &str = "Try widening the date range to include more days.";
pub const DROP_PREFERENCE: &str =
    "Try removing the time-of-day preference to include all hours.";
pub const SHORTER_DURATION: &str =
    "Try one-hour slots instead of a half-day or full-day block.";
pub const REMOVE_COUNT: &str = "Remove the result limit to see more matches.";

/// What a handler knew when its result came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintContext {
    /// Open items in the range before any preference or duration filtering.
    pub unfiltered_total: usize,
    /// Items that survived filtering, before the count cap.
    pub prefiltered_total: usize,
    pub time_preference: TimePreference,
    pub duration: SlotDuration,
    pub count: Option<usize>,
}

/// Hints explaining an empty result.
///
/// With nothing open in the range at all, only widening the range can help.
/// Otherwise each relaxation that applies is mentioned.
pub fn hints(ctx: &HintContext) -> Vec<String> {
    if ctx.unfiltered_total == 0 {
        return vec![WIDEN_RANGE.to_string()];
    }

    let mut hints = Vec::new();
    if !ctx.time_preference.is_any() {
        hints.push(DROP_PREFERENCE.to_string());
    }
    if ctx.duration.is_multi_hour() {
        hints.push(SHORTER_DURATION.to_string());
    }
    if ctx.count.is_some_and(|cap| ctx.prefiltered_total > cap) {
        hints.push(REMOVE_COUNT.to_string());
    }

    if hints.is_empty() {
        hints.push(WIDEN_RANGE.to_string());
    }
    hints
}
