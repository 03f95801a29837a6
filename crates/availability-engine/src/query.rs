//! Query and result types.
//!
//! Queries arrive either built in code or decoded from the JSON wire form
//! produced by the text-to-query translator:
//!
//! ```json
//! {"intent": "find_slots", "startDate": "2025-01-06", "endDate": "2025-01-10",
//!  "timePreference": "afternoon", "duration": "half-day", "count": 5}
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::slot::{Period, TimeSlot};

/// What the caller wants to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Intent {
    /// Dates with no blocked slot at all.
    FindDays,
    /// Individual open hourly slots.
    FindSlots,
    /// Open slots ranked by quality.
    SuggestTimes,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::FindDays => "find_days",
            Intent::FindSlots => "find_slots",
            Intent::SuggestTimes => "suggest_times",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "find_days" => Ok(Intent::FindDays),
            "find_slots" => Ok(Intent::FindSlots),
            "suggest_times" => Ok(Intent::SuggestTimes),
            other => Err(EngineError::UnknownIntent(other.to_string())),
        }
    }
}

impl TryFrom<String> for Intent {
    type Error = EngineError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Time-of-day filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    #[default]
    Any,
    Morning,
    Afternoon,
    Evening,
}

impl TimePreference {
    /// The period this preference selects, `None` for `Any`.
    pub fn period(self) -> Option<Period> {
        match self {
            TimePreference::Any => None,
            TimePreference::Morning => Some(Period::Morning),
            TimePreference::Afternoon => Some(Period::Afternoon),
            TimePreference::Evening => Some(Period::Evening),
        }
    }

    /// Candidate slots, in day order.
    pub fn slots(self) -> &'static [TimeSlot] {
        match self.period() {
            Some(period) => period.slots(),
            None => TimeSlot::all(),
        }
    }

    pub fn is_any(self) -> bool {
        self == TimePreference::Any
    }
}

impl FromStr for TimePreference {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "any" => Ok(TimePreference::Any),
            "morning" => Ok(TimePreference::Morning),
            "afternoon" => Ok(TimePreference::Afternoon),
            "evening" => Ok(TimePreference::Evening),
            other => Err(EngineError::InvalidQuery(format!(
                "unknown time preference '{}'",
                other
            ))),
        }
    }
}

impl From<Period> for TimePreference {
    fn from(period: Period) -> Self {
        match period {
            Period::Morning => TimePreference::Morning,
            Period::Afternoon => TimePreference::Afternoon,
            Period::Evening => TimePreference::Evening,
        }
    }
}

/// Required contiguous block length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotDuration {
    #[default]
    OneHour,
    HalfDay,
    FullDay,
}

impl SlotDuration {
    /// Contiguous hours required.
    pub fn hours(self) -> usize {
        match self {
            SlotDuration::OneHour => 1,
            SlotDuration::HalfDay => 6,
            SlotDuration::FullDay => 16,
        }
    }

    pub fn is_multi_hour(self) -> bool {
        self.hours() > 1
    }
}

impl FromStr for SlotDuration {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "one-hour" | "1h" => Ok(SlotDuration::OneHour),
            "half-day" => Ok(SlotDuration::HalfDay),
            "full-day" => Ok(SlotDuration::FullDay),
            other => Err(EngineError::InvalidQuery(format!("unknown duration '{}'", other))),
        }
    }
}

/// A structured availability query.
///
/// Dates are kept as the caller supplied them; they are parsed and validated
/// when the query is executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub intent: Intent,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub time_preference: TimePreference,
    #[serde(default)]
    pub duration: SlotDuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Query {
    pub fn new(intent: Intent, start_date: impl Into<String>, end_date: impl Into<String>) -> Query {
        Query {
            intent,
            start_date: start_date.into(),
            end_date: end_date.into(),
            time_preference: TimePreference::Any,
            duration: SlotDuration::OneHour,
            count: None,
        }
    }

    pub fn find_days(start_date: impl Into<String>, end_date: impl Into<String>) -> Query {
        Query::new(Intent::FindDays, start_date, end_date)
    }

    pub fn find_slots(start_date: impl Into<String>, end_date: impl Into<String>) -> Query {
        Query::new(Intent::FindSlots, start_date, end_date)
    }

    pub fn suggest_times(start_date: impl Into<String>, end_date: impl Into<String>) -> Query {
        Query::new(Intent::SuggestTimes, start_date, end_date)
    }

    pub fn prefer(mut self, time_preference: TimePreference) -> Query {
        self.time_preference = time_preference;
        self
    }

    pub fn lasting(mut self, duration: SlotDuration) -> Query {
        self.duration = duration;
        self
    }

    pub fn limit(mut self, count: usize) -> Query {
        self.count = Some(count);
        self
    }

    /// Decode the JSON wire form.
    ///
    /// # Errors
    /// Returns `EngineError::UnknownIntent` when `intent` names no known
    /// intent, and `EngineError::InvalidQuery` for any other decoding failure.
    pub fn from_json(json: &str) -> Result<Query> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidQuery(e.to_string()))?;

        if let Some(intent) = value.get("intent").and_then(serde_json::Value::as_str) {
            intent.parse::<Intent>()?;
        }

        serde_json::from_value(value).map_err(|e| EngineError::InvalidQuery(e.to_string()))
    }
}

/// An open hourly slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpenSlot {
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub period: Period,
}

impl OpenSlot {
    pub fn new(date: NaiveDate, slot: TimeSlot) -> OpenSlot {
        OpenSlot {
            date,
            slot,
            period: slot.period(),
        }
    }
}

/// A ranked candidate meeting time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSuggestion {
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub period: Period,
    /// Quality in `[0, 1]`; higher is better.
    pub score: f64,
    /// Open hours from this slot to the next block or the end of the day.
    pub consecutive_hours: usize,
    pub reason: String,
}

/// Result items; the variant follows the query's intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryItems {
    Days(Vec<NaiveDate>),
    Slots(Vec<OpenSlot>),
    Suggestions(Vec<TimeSuggestion>),
}

impl QueryItems {
    pub fn len(&self) -> usize {
        match self {
            QueryItems::Days(days) => days.len(),
            QueryItems::Slots(slots) => slots.len(),
            QueryItems::Suggestions(suggestions) => suggestions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of a successfully validated query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub intent: Intent,
    pub results: QueryItems,
    /// The query as received.
    pub query: Query,
    /// Remediation hints, present only when `results` is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn days(&self) -> &[NaiveDate] {
        match &self.results {
            QueryItems::Days(days) => days,
            _ => &[],
        }
    }

    pub fn slots(&self) -> &[OpenSlot] {
        match &self.results {
            QueryItems::Slots(slots) => slots,
            _ => &[],
        }
    }

    pub fn time_suggestions(&self) -> &[TimeSuggestion] {
        match &self.results {
            QueryItems::Suggestions(suggestions) => suggestions,
            _ => &[],
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| EngineError::InvalidQuery(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::InvalidQuery(e.to_string()))
    }
}
