//! # availability-engine
//!
//! Deterministic availability queries over an instructor's hourly calendar.
//!
//! A calendar is a snapshot of per-day blocked hours inside a fixed
//! 06:00–22:00 window. The engine answers three kinds of structured queries
//! against a bounded date range: fully open days, open hourly slots, and
//! ranked meeting-time suggestions. It performs no I/O and never mutates the
//! snapshot it holds.
//!
//! ## Modules
//!
//! - [`slot`] — the 16 fixed hourly slots and their morning/afternoon/evening periods
//! - [`calendar`] — snapshot data model (slot bitmask, day status, export blob)
//! - [`dates`] — ISO date parsing and validated inclusive date ranges
//! - [`query`] — query and result types
//! - [`engine`] — the [`AvailabilityQueryEngine`]
//! - [`ranking`] — scoring of suggested meeting times
//! - [`hints`] — remediation text for empty results
//! - [`error`] — Error types

pub mod calendar;
pub mod dates;
pub mod engine;
pub mod error;
pub mod hints;
pub mod query;
pub mod ranking;
pub mod slot;

pub use calendar::{CalendarSnapshot, DayStatus, SlotMask};
pub use dates::{DateRange, MAX_RANGE_DAYS};
pub use engine::AvailabilityQueryEngine;
pub use error::EngineError;
pub use query::{
    Intent, OpenSlot, Query, QueryItems, QueryResult, SlotDuration, TimePreference,
    TimeSuggestion,
};
pub use slot::{Period, TimeSlot, SLOT_COUNT};
