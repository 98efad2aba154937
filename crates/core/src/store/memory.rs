use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::engine::conflict::find_conflict;
use crate::errors::{BookingError, BookingResult};
use crate::models::{
    appointment::{Appointment, AppointmentDetails, NewAppointment},
    service::{NewService, Service},
};

use super::{AppointmentFilter, BookingStore};

#[derive(Debug, Default)]
struct Tables {
    services: Vec<Service>,
    appointments: Vec<Appointment>,
}

/// Process-local store. Every write takes the single write guard, so the
/// conflict re-check and the insert of `create_appointment` cannot interleave
/// with another booking.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn find_service(&self, id: Uuid) -> BookingResult<Option<Service>> {
        let tables = self.tables.read().await;
        Ok(tables.services.iter().find(|s| s.id == id).cloned())
    }

    async fn list_services(&self) -> BookingResult<Vec<Service>> {
        Ok(self.tables.read().await.services.clone())
    }

    async fn create_service(&self, service: NewService) -> BookingResult<Service> {
        let service = Service {
            id: Uuid::new_v4(),
            name: service.name,
            price: service.price,
            duration_minutes: service.duration_minutes,
            available: service.available,
            created_at: Utc::now(),
        };
        self.tables.write().await.services.push(service.clone());
        Ok(service)
    }

    async fn find_appointments(&self, filter: AppointmentFilter) -> BookingResult<Vec<Appointment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn list_appointments(&self) -> BookingResult<Vec<AppointmentDetails>> {
        let tables = self.tables.read().await;
        let mut details: Vec<AppointmentDetails> = tables
            .appointments
            .iter()
            .map(|appointment| AppointmentDetails {
                service_name: tables
                    .services
                    .iter()
                    .find(|s| s.id == appointment.service_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_default(),
                appointment: appointment.clone(),
            })
            .collect();
        details.sort_by(|a, b| b.appointment.created_at.cmp(&a.appointment.created_at));
        Ok(details)
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> BookingResult<Appointment> {
        let mut tables = self.tables.write().await;

        if !tables.services.iter().any(|s| s.id == appointment.service_id) {
            return Err(BookingError::NotFound(format!(
                "Service with ID {} not found",
                appointment.service_id
            )));
        }

        let same_service = tables
            .appointments
            .iter()
            .filter(|a| a.service_id == appointment.service_id);
        if let Some(existing) = find_conflict(&appointment.interval, same_service) {
            return Err(BookingError::SlotUnavailable(format!(
                "The time slot is already booked by appointment {}",
                existing.id
            )));
        }

        let created = Appointment {
            id: Uuid::new_v4(),
            service_id: appointment.service_id,
            customer_name: appointment.customer_name,
            customer_email: appointment.customer_email,
            start_time: appointment.interval.start,
            end_time: appointment.interval.end,
            created_at: Utc::now(),
        };
        tables.appointments.push(created.clone());
        Ok(created)
    }
}
