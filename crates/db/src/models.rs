use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use slotbook_core::models::{
    appointment::{Appointment, AppointmentDetails},
    service::Service,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub service_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentWithService {
    #[sqlx(flatten)]
    pub appointment: DbAppointment,
    pub service_name: String,
}

impl TryFrom<DbService> for Service {
    type Error = eyre::Report;

    fn try_from(row: DbService) -> Result<Self> {
        let duration_minutes = u32::try_from(row.duration_minutes).map_err(|_| {
            eyre!(
                "Service {} has invalid duration {}",
                row.id,
                row.duration_minutes
            )
        })?;

        Ok(Service {
            id: row.id,
            name: row.name,
            price: row.price,
            duration_minutes,
            available: row.available,
            created_at: row.created_at,
        })
    }
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Appointment {
            id: row.id,
            service_id: row.service_id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}

impl From<DbAppointmentWithService> for AppointmentDetails {
    fn from(row: DbAppointmentWithService) -> Self {
        AppointmentDetails {
            appointment: row.appointment.into(),
            service_name: row.service_name,
        }
    }
}
