//! Calendar snapshot data model.
//!
//! A snapshot maps ISO dates to a [`DayStatus`]. Only dates with some blocking
//! need an entry: a date absent from the snapshot is fully available. Each
//! day's blocked hours are a [`SlotMask`], serialized in the export blob as a
//! `{"09:00": true}` map.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::slot::{TimeSlot, SLOT_COUNT};

/// Set of blocked slots for one day. Bit `i` set means slot `i` is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, serde_json::Value>",
    into = "BTreeMap<String, bool>"
)]
pub struct SlotMask(u16);

impl SlotMask {
    const ALL_BITS: u16 = u16::MAX >> (16 - SLOT_COUNT);

    pub const fn empty() -> SlotMask {
        SlotMask(0)
    }

    pub const fn full() -> SlotMask {
        SlotMask(Self::ALL_BITS)
    }

    /// Build a mask from raw bits; bits beyond the slot universe are dropped.
    pub const fn from_bits(bits: u16) -> SlotMask {
        SlotMask(bits & Self::ALL_BITS)
    }

    pub fn from_slots<I: IntoIterator<Item = TimeSlot>>(slots: I) -> SlotMask {
        slots.into_iter().fold(SlotMask::empty(), |mask, slot| mask.with(slot))
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub fn is_blocked(self, slot: TimeSlot) -> bool {
        self.0 & (1 << slot.index()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_full(self) -> bool {
        self.0 == Self::ALL_BITS
    }

    pub fn blocked_count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn open_count(self) -> usize {
        SLOT_COUNT - self.blocked_count()
    }

    pub fn block(&mut self, slot: TimeSlot) {
        self.0 |= 1 << slot.index();
    }

    pub fn unblock(&mut self, slot: TimeSlot) {
        self.0 &= !(1 << slot.index());
    }

    /// Copy of this mask with `slot` blocked.
    pub fn with(mut self, slot: TimeSlot) -> SlotMask {
        self.block(slot);
        self
    }

    /// Count of consecutive open slots starting at `slot`, stopping at the
    /// first blocked slot or the end of the day. Zero if `slot` is blocked.
    pub fn run_from(self, slot: TimeSlot) -> usize {
        let shifted = self.0 >> slot.index();
        let run = shifted.trailing_zeros() as usize;
        run.min(slot.remaining_in_day())
    }

    /// Blocked slots in day order.
    pub fn blocked_slots(self) -> impl Iterator<Item = TimeSlot> {
        TimeSlot::ALL.into_iter().filter(move |s| self.is_blocked(*s))
    }
}

impl From<BTreeMap<String, serde_json::Value>> for SlotMask {
    /// Only an explicit `true` blocks a slot. Unknown labels and non-boolean
    /// values read as available.
    fn from(map: BTreeMap<String, serde_json::Value>) -> Self {
        map.iter()
            .filter(|(_, value)| matches!(value, serde_json::Value::Bool(true)))
            .filter_map(|(label, _)| label.parse::<TimeSlot>().ok())
            .fold(SlotMask::empty(), SlotMask::with)
    }
}

impl From<SlotMask> for BTreeMap<String, bool> {
    fn from(mask: SlotMask) -> Self {
        mask.blocked_slots().map(|s| (s.label(), true)).collect()
    }
}

/// Blocking recorded for a single calendar date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStatus {
    /// Hour-level blocks.
    #[serde(default)]
    pub slots: SlotMask,
    /// Shortcut: the whole day is blocked regardless of `slots`.
    #[serde(default)]
    pub full_day_blocked: bool,
    /// Free-text note shown on the calendar (e.g. "Conference").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DayStatus {
    pub fn blocked(slots: SlotMask) -> DayStatus {
        DayStatus {
            slots,
            ..DayStatus::default()
        }
    }

    pub fn full_day() -> DayStatus {
        DayStatus {
            full_day_blocked: true,
            ..DayStatus::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> DayStatus {
        self.label = Some(label.into());
        self
    }

    /// The blocked set after applying the whole-day shortcut.
    pub fn effective_mask(&self) -> SlotMask {
        if self.full_day_blocked {
            SlotMask::full()
        } else {
            self.slots
        }
    }
}

/// Immutable view of one instructor's calendar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSnapshot {
    /// Opaque owner identifier.
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub last_modified: DateTime<Utc>,
    /// Dates with any recorded blocking. Absent dates are fully open.
    #[serde(default)]
    pub days: BTreeMap<NaiveDate, DayStatus>,
}

impl CalendarSnapshot {
    pub fn new(owner_id: impl Into<String>) -> CalendarSnapshot {
        CalendarSnapshot {
            owner_id: owner_id.into(),
            ..CalendarSnapshot::default()
        }
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> CalendarSnapshot {
        self.last_modified = last_modified;
        self
    }

    pub fn with_day(mut self, date: NaiveDate, status: DayStatus) -> CalendarSnapshot {
        self.days.insert(date, status);
        self
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayStatus> {
        self.days.get(&date)
    }

    /// Blocked slots on `date`; empty when the date has no entry.
    pub fn blocked_mask(&self, date: NaiveDate) -> SlotMask {
        self.day(date)
            .map(DayStatus::effective_mask)
            .unwrap_or_default()
    }

    /// True when no slot on `date` is blocked.
    pub fn is_fully_open(&self, date: NaiveDate) -> bool {
        self.blocked_mask(date).is_empty()
    }

    pub fn is_slot_open(&self, date: NaiveDate, slot: TimeSlot) -> bool {
        !self.blocked_mask(date).is_blocked(slot)
    }

    /// Consecutive open hours on `date` starting at `slot`.
    pub fn open_run(&self, date: NaiveDate, slot: TimeSlot) -> usize {
        self.blocked_mask(date).run_from(slot)
    }

    /// Decode a calendar export blob.
    pub fn from_json(json: &str) -> Result<CalendarSnapshot> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidSnapshot(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| EngineError::InvalidSnapshot(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(label: &str) -> TimeSlot {
        label.parse().unwrap()
    }

    #[test]
    fn run_from_stops_at_first_block() {
        let mask = SlotMask::from_slots([slot("10:00"), slot("15:00")]);
        assert_eq!(mask.run_from(slot("06:00")), 4);
        assert_eq!(mask.run_from(slot("10:00")), 0);
        assert_eq!(mask.run_from(slot("11:00")), 4);
        assert_eq!(mask.run_from(slot("16:00")), 6);
    }

    #[test]
    fn run_from_on_empty_mask_reaches_end_of_day() {
        let mask = SlotMask::empty();
        assert_eq!(mask.run_from(slot("06:00")), 16);
        assert_eq!(mask.run_from(slot("21:00")), 1);
    }

    #[test]
    fn full_mask_has_every_slot_blocked() {
        let mask = SlotMask::full();
        assert!(mask.is_full());
        assert_eq!(mask.blocked_count(), 16);
        assert_eq!(mask.open_count(), 0);
        assert_eq!(mask.run_from(slot("06:00")), 0);
    }

    #[test]
    fn unblock_clears_a_slot() {
        let mut mask = SlotMask::full();
        mask.unblock(slot("13:00"));
        assert_eq!(mask.open_count(), 1);
        assert_eq!(mask.run_from(slot("13:00")), 1);
    }

    #[test]
    fn from_bits_drops_out_of_range_bits() {
        assert_eq!(SlotMask::from_bits(u16::MAX), SlotMask::full());
    }

    #[test]
    fn mask_deserialization_ignores_false_and_malformed_entries() {
        let mask: SlotMask = serde_json::from_str(
            r#"{"09:00": true, "10:00": false, "11:00": "yes", "25:00": true, "12:00": null}"#,
        )
        .unwrap();
        assert_eq!(mask.blocked_slots().collect::<Vec<_>>(), vec![slot("09:00")]);
    }

    #[test]
    fn mask_serializes_only_blocked_slots() {
        let mask = SlotMask::from_slots([slot("18:00"), slot("06:00")]);
        let json = serde_json::to_string(&mask).unwrap();
        assert_eq!(json, r#"{"06:00":true,"18:00":true}"#);
    }

    #[test]
    fn full_day_flag_overrides_slots() {
        let status = DayStatus::full_day();
        assert!(status.effective_mask().is_full());
    }
}
