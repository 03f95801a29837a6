//! ISO date parsing and validated inclusive date ranges.

use chrono::{Days, NaiveDate};

use crate::error::{EngineError, Result};

/// Longest accepted query range, counted inclusively.
pub const MAX_RANGE_DAYS: i64 = 90;

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono's `%Y-%m-%d` also takes signed years and unpadded fields, so the
/// shape is checked byte by byte first.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let bytes = s.as_bytes();
    let iso_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !iso_shaped {
        return Err(EngineError::InvalidDate(format!(
            "'{}': expected YYYY-MM-DD",
            s
        )));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| EngineError::InvalidDate(format!("'{}': {}", s, e)))
}

/// An inclusive `[start, end]` range of at most [`MAX_RANGE_DAYS`] dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// # Errors
    /// Returns `EngineError::EndBeforeStart` if `end < start`, and
    /// `EngineError::RangeTooLong` if the range covers more than 90 dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<DateRange> {
        if end < start {
            return Err(EngineError::EndBeforeStart { start, end });
        }
        let days = (end - start).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(EngineError::RangeTooLong {
                days,
                max: MAX_RANGE_DAYS,
            });
        }
        Ok(DateRange { start, end })
    }

    /// Parse both bounds and validate the range.
    pub fn parse(start: &str, end: &str) -> Result<DateRange> {
        DateRange::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of dates in the range (inclusive).
    pub fn len_days(&self) -> i64 {
        self.span_days() + 1
    }

    /// Whole days between `start` and `end`; zero for a single-day range.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Days from `start` to `date`.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    /// Dates in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len_days() as u64).filter_map(move |i| start.checked_add_days(Days::new(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn days_iterates_inclusively() {
        let range = DateRange::parse("2025-01-30", "2025-02-02").unwrap();
        let days: Vec<String> = range.days().map(|d| d.to_string()).collect();
        assert_eq!(days, ["2025-01-30", "2025-01-31", "2025-02-01", "2025-02-02"]);
        assert_eq!(range.len_days(), 4);
        assert_eq!(range.span_days(), 3);
    }

    #[test]
    fn ninety_days_accepted_ninety_one_rejected() {
        let start = date("2025-01-01");
        let ninety = start + chrono::Duration::days(89);
        assert!(DateRange::new(start, ninety).is_ok());
        let err = DateRange::new(start, ninety + chrono::Duration::days(1)).unwrap_err();
        assert_eq!(err, EngineError::RangeTooLong { days: 91, max: 90 });
    }

    #[test]
    fn malformed_dates_rejected() {
        assert!(matches!(parse_date("2025-13-01"), Err(EngineError::InvalidDate(_))));
        assert!(matches!(parse_date("01/02/2025"), Err(EngineError::InvalidDate(_))));
        assert!(matches!(parse_date(""), Err(EngineError::InvalidDate(_))));
    }

    #[test]
    fn non_iso_shapes_rejected() {
        for input in ["2025-1-5", " 2025-01-05 ", "+2025-01-05", "2025-01-5", "2025/01/05"] {
            assert!(
                matches!(parse_date(input), Err(EngineError::InvalidDate(_))),
                "accepted {:?}",
                input
            );
        }
        assert_eq!(parse_date("2025-01-05").unwrap(), date("2025-01-05"));
    }
}
