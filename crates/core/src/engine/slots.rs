use chrono::{Duration, NaiveDate, NaiveTime};

use crate::engine::interval::Interval;
use crate::errors::{BookingError, BookingResult};
use crate::models::slot::Slot;

/// Daily window in which slots are offered, interpreted in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    open: NaiveTime,
    close: NaiveTime,
}

impl WorkingHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> BookingResult<Self> {
        if close <= open {
            return Err(BookingError::InvalidInput(format!(
                "Working hours close ({close}) must be after open ({open})"
            )));
        }
        Ok(Self { open, close })
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// The window on `date` as an absolute interval.
    pub fn window(&self, date: NaiveDate) -> Interval {
        Interval::new(
            date.and_time(self.open).and_utc(),
            date.and_time(self.close).and_utc(),
        )
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time"),
            close: NaiveTime::from_hms_opt(17, 0, 0).expect("17:00 is a valid time"),
        }
    }
}

/// Back-to-back slots of `duration_minutes` from the window open, stopping at
/// the last one that ends at or before close. Never emits a truncated slot.
pub fn generate_slots(duration_minutes: u32, date: NaiveDate, hours: &WorkingHours) -> Vec<Slot> {
    if duration_minutes == 0 {
        return Vec::new();
    }

    let window = hours.window(date);
    let step = Duration::minutes(i64::from(duration_minutes));
    let mut slots = Vec::new();
    let mut start = window.start;

    while let Some(end) = start.checked_add_signed(step).filter(|end| *end <= window.end) {
        slots.push(Slot::new(Interval::new(start, end), duration_minutes));
        start = end;
    }

    slots
}
