use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// Calendar years accepted anywhere an instant or date enters the engine.
/// PostgreSQL `timestamptz` cannot hold most of chrono's range.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

fn check_year(date: NaiveDate) -> BookingResult<()> {
    if SUPPORTED_YEARS.contains(&date.year()) {
        Ok(())
    } else {
        Err(BookingError::InvalidInput(format!(
            "Date {date} is outside the supported years {}..={}",
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )))
    }
}

/// Half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start < end, "Interval start must be before end");
        Self { start, end }
    }

    /// Builds an interval from untrusted input, rejecting empty or inverted ranges.
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> BookingResult<Self> {
        check_year(start.date_naive())?;
        check_year(end.date_naive())?;
        if end <= start {
            return Err(BookingError::InvalidInput(format!(
                "End time {} must be after start time {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// The whole calendar day `[date 00:00, date+1 00:00)` in UTC.
    pub fn day(date: NaiveDate) -> BookingResult<Self> {
        check_year(date)?;
        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = start
            .checked_add_signed(Duration::days(1))
            .ok_or_else(|| BookingError::InvalidInput(format!("Date {date} has no following day")))?;
        Ok(Self::new(start, end))
    }

    /// Strict overlap: intervals that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Truncates an instant to the start of its minute.
pub fn truncate_to_minute(instant: DateTime<Utc>) -> BookingResult<DateTime<Utc>> {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(|| BookingError::InvalidInput(format!("Unsupported timestamp {instant}")))
}
