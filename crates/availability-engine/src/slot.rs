//! The fixed hourly slot universe and its period partition.
//!
//! A day is sixteen one-hour slots, 06:00 through 21:00 (the last slot ends
//! at 22:00). Slots are identified by their position in that ordering, so a
//! day's blocked set fits in a `u16` (see [`crate::calendar::SlotMask`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Number of hourly slots in a day.
pub const SLOT_COUNT: usize = 16;

/// Hour of the first slot.
pub const FIRST_HOUR: u8 = 6;

/// Coarse time-of-day classification of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// 06:00–11:00 (6 slots)
    Morning,
    /// 12:00–17:00 (6 slots)
    Afternoon,
    /// 18:00–21:00 (4 slots)
    Evening,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Morning, Period::Afternoon, Period::Evening];

    /// Classify an hour of the day. Hours before noon are morning, 12–17 are
    /// afternoon, and 18 onwards is evening.
    pub fn from_hour(hour: u8) -> Period {
        match hour {
            0..=11 => Period::Morning,
            12..=17 => Period::Afternoon,
            _ => Period::Evening,
        }
    }

    /// The slots belonging to this period, in day order.
    pub fn slots(self) -> &'static [TimeSlot] {
        match self {
            Period::Morning => &SLOTS[0..6],
            Period::Afternoon => &SLOTS[6..12],
            Period::Evening => &SLOTS[12..16],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
            Period::Evening => "evening",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static SLOTS: [TimeSlot; SLOT_COUNT] = TimeSlot::ALL;

/// One of the sixteen hourly slots, stored as its index in day order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TimeSlot(u8);

impl TimeSlot {
    /// All slots in day order, 06:00 through 21:00.
    pub const ALL: [TimeSlot; SLOT_COUNT] = [
        TimeSlot(0),
        TimeSlot(1),
        TimeSlot(2),
        TimeSlot(3),
        TimeSlot(4),
        TimeSlot(5),
        TimeSlot(6),
        TimeSlot(7),
        TimeSlot(8),
        TimeSlot(9),
        TimeSlot(10),
        TimeSlot(11),
        TimeSlot(12),
        TimeSlot(13),
        TimeSlot(14),
        TimeSlot(15),
    ];

    /// All slots in day order, as a slice.
    pub fn all() -> &'static [TimeSlot] {
        &SLOTS
    }

    /// Slot at `index` in day order, or `None` if out of range.
    pub fn from_index(index: usize) -> Option<TimeSlot> {
        TimeSlot::ALL.get(index).copied()
    }

    /// Slot starting at `hour`, or `None` outside 06–21.
    pub fn from_hour(hour: u8) -> Option<TimeSlot> {
        hour.checked_sub(FIRST_HOUR)
            .and_then(|i| TimeSlot::from_index(i as usize))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Starting hour (6..=21).
    pub fn hour(self) -> u8 {
        FIRST_HOUR + self.0
    }

    pub fn period(self) -> Period {
        Period::from_hour(self.hour())
    }

    /// The `"HH:00"` label used as a key in the calendar export blob.
    pub fn label(self) -> String {
        format!("{:02}:00", self.hour())
    }

    /// Number of slots from this one to the end of the day, inclusive.
    pub fn remaining_in_day(self) -> usize {
        SLOT_COUNT - self.index()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.hour())
    }
}

impl FromStr for TimeSlot {
    type Err = EngineError;

    /// Parse an `"HH:00"` or `"H:00"` label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidQuery(format!("unknown time slot '{}'", s));

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if minute != "00" || hour.is_empty() || hour.len() > 2 {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        TimeSlot::from_hour(hour).ok_or_else(invalid)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.label()
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
