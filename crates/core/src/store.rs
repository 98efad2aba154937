//! Persistence boundary of the booking engine.
//!
//! The engine never talks to a database directly; it is handed an
//! `Arc<dyn BookingStore>`. `slotbook-db` provides the PostgreSQL
//! implementation and [`memory::InMemoryStore`] backs tests and local runs.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::engine::interval::Interval;
use crate::errors::BookingResult;
use crate::models::{
    appointment::{Appointment, AppointmentDetails, NewAppointment},
    service::{NewService, Service},
};

/// Which persisted appointments a query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentFilter {
    /// Appointments of one service overlapping `range`.
    ForService { service_id: Uuid, range: Interval },
    /// Appointments of every service overlapping `range` (shared calendar).
    All { range: Interval },
}

impl AppointmentFilter {
    pub fn range(&self) -> Interval {
        match self {
            AppointmentFilter::ForService { range, .. } | AppointmentFilter::All { range } => *range,
        }
    }

    pub fn service_id(&self) -> Option<Uuid> {
        match self {
            AppointmentFilter::ForService { service_id, .. } => Some(*service_id),
            AppointmentFilter::All { .. } => None,
        }
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        let in_scope = self
            .service_id()
            .is_none_or(|service_id| appointment.service_id == service_id);
        in_scope && appointment.interval().overlaps(&self.range())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_service(&self, id: Uuid) -> BookingResult<Option<Service>>;

    async fn list_services(&self) -> BookingResult<Vec<Service>>;

    async fn create_service(&self, service: NewService) -> BookingResult<Service>;

    /// Unordered set of appointments selected by `filter`.
    async fn find_appointments(&self, filter: AppointmentFilter) -> BookingResult<Vec<Appointment>>;

    /// All appointments with their service names, newest first.
    async fn list_appointments(&self) -> BookingResult<Vec<AppointmentDetails>>;

    /// Inserts the appointment unless it overlaps another appointment of the
    /// same service. The overlap check and the insert must be atomic with
    /// respect to concurrent calls for that service; a conflict is reported as
    /// `BookingError::SlotUnavailable` and leaves the store untouched.
    async fn create_appointment(&self, appointment: NewAppointment) -> BookingResult<Appointment>;
}
