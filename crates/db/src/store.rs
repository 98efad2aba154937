use async_trait::async_trait;
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, AppointmentDetails, NewAppointment},
        service::{NewService, Service},
    },
    store::{AppointmentFilter, BookingStore},
};
use uuid::Uuid;

use crate::repositories::{
    appointment::{self, InsertOutcome},
    service,
};
use crate::DbPool;

/// PostgreSQL-backed [`BookingStore`].
///
/// Repository errors are `eyre::Report`s and surface as
/// `BookingError::StoreUnavailable`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn find_service(&self, id: Uuid) -> BookingResult<Option<Service>> {
        let row = service::get_service_by_id(&self.pool, id).await?;
        Ok(row.map(Service::try_from).transpose()?)
    }

    async fn list_services(&self) -> BookingResult<Vec<Service>> {
        let rows = service::list_services(&self.pool).await?;
        let services = rows
            .into_iter()
            .map(Service::try_from)
            .collect::<eyre::Result<Vec<_>>>()?;
        Ok(services)
    }

    async fn create_service(&self, new_service: NewService) -> BookingResult<Service> {
        let row = service::create_service(&self.pool, &new_service).await?;
        Ok(Service::try_from(row)?)
    }

    async fn find_appointments(&self, filter: AppointmentFilter) -> BookingResult<Vec<Appointment>> {
        let rows = appointment::find_appointments(&self.pool, &filter).await?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn list_appointments(&self) -> BookingResult<Vec<AppointmentDetails>> {
        let rows = appointment::list_appointments_with_service(&self.pool).await?;
        Ok(rows.into_iter().map(AppointmentDetails::from).collect())
    }

    async fn create_appointment(&self, new_appointment: NewAppointment) -> BookingResult<Appointment> {
        match appointment::create_appointment_if_free(&self.pool, &new_appointment).await? {
            InsertOutcome::Created(row) => Ok(row.into()),
            InsertOutcome::Conflict => Err(BookingError::SlotUnavailable(format!(
                "The time slot starting at {} is already booked",
                new_appointment.interval.start.to_rfc3339()
            ))),
            InsertOutcome::ServiceMissing => Err(BookingError::NotFound(format!(
                "Service with ID {} not found",
                new_appointment.service_id
            ))),
        }
    }
}
