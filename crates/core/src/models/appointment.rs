use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::engine::interval::{truncate_to_minute, Interval};
use crate::errors::BookingResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub service_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// An appointment together with the name of the service it books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetails {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub service_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Customer name must be 1 to 255 characters"))]
    pub customer_name: String,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub customer_email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Booking request after validation: trimmed name, normalized email and a
/// minute-aligned, non-empty interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub service_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub interval: Interval,
}

impl CreateAppointmentRequest {
    /// Normalizes the customer fields, checks them, and aligns both instants
    /// to the start of their minute.
    pub fn into_new_appointment(self) -> BookingResult<NewAppointment> {
        let request = Self {
            customer_name: self.customer_name.trim().to_string(),
            customer_email: normalize_email(&self.customer_email),
            ..self
        };
        request.validate()?;

        let start = truncate_to_minute(request.start_time)?;
        let end = truncate_to_minute(request.end_time)?;
        let interval = Interval::try_new(start, end)?;

        Ok(NewAppointment {
            service_id: request.service_id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            interval,
        })
    }
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
