use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::interval::Interval;

/// A candidate, not-yet-booked interval of a service's duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Length in minutes.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl Slot {
    pub fn new(interval: Interval, duration: u32) -> Self {
        Self {
            start_time: interval.start,
            end_time: interval.end,
            duration,
            score: None,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub service_id: Uuid,
    pub date: NaiveDate,
}
