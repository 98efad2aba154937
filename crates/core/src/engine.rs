//! # Availability & booking engine
//!
//! Ties the pure building blocks together against an injected
//! [`BookingStore`]:
//!
//! 1. [`slots`] generates the candidate slots of a service for one day
//! 2. [`conflict`] drops candidates that overlap persisted appointments
//! 3. [`ranker`] optionally reorders what is left by adjacency
//! 4. [`BookingEngine::book_slot`] re-checks and records a booking
//!
//! The engine itself holds no locks and no state besides its configuration.
//! Every store call is bounded by `EngineConfig::store_timeout`.

pub mod conflict;
pub mod interval;
pub mod ranker;
pub mod slots;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use eyre::eyre;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::models::{
    appointment::{Appointment, AppointmentDetails, NewAppointment},
    service::{NewService, Service},
    slot::Slot,
};
use crate::store::{AppointmentFilter, BookingStore};

use self::interval::Interval;
use self::slots::WorkingHours;

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub working_hours: WorkingHours,
    /// Upper bound on any single store call.
    pub store_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            working_hours: WorkingHours::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

#[derive(Clone)]
pub struct BookingEngine {
    store: Arc<dyn BookingStore>,
    config: EngineConfig,
}

impl BookingEngine {
    pub fn new(store: Arc<dyn BookingStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn with_timeout<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = BookingResult<T>>,
    ) -> BookingResult<T> {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Store call {} timed out after {:?}",
                    operation, self.config.store_timeout
                );
                Err(BookingError::StoreUnavailable(eyre!(
                    "{} timed out after {:?}",
                    operation,
                    self.config.store_timeout
                )))
            }
        }
    }

    pub async fn find_service(&self, id: Uuid) -> BookingResult<Service> {
        self.with_timeout("find_service", self.store.find_service(id))
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Service with ID {} not found", id)))
    }

    pub async fn list_services(&self) -> BookingResult<Vec<Service>> {
        self.with_timeout("list_services", self.store.list_services())
            .await
    }

    pub async fn create_service(&self, service: NewService) -> BookingResult<Service> {
        let service = self
            .with_timeout("create_service", self.store.create_service(service))
            .await?;
        info!(
            "Created service {} ({}, {} min)",
            service.id, service.name, service.duration_minutes
        );
        Ok(service)
    }

    pub async fn list_appointments(&self) -> BookingResult<Vec<AppointmentDetails>> {
        self.with_timeout("list_appointments", self.store.list_appointments())
            .await
    }

    async fn find_appointments(&self, filter: AppointmentFilter) -> BookingResult<Vec<Appointment>> {
        self.with_timeout("find_appointments", self.store.find_appointments(filter))
            .await
    }

    /// Slots of `service_id` on `date` that no appointment of the same service
    /// overlaps, in chronological order.
    pub async fn list_availability(&self, service_id: Uuid, date: NaiveDate) -> BookingResult<Vec<Slot>> {
        let day = Interval::day(date)?;
        let service = self.find_service(service_id).await?;
        let candidates = slots::generate_slots(service.duration_minutes, date, &self.config.working_hours);

        let booked = self
            .find_appointments(AppointmentFilter::ForService {
                service_id,
                range: day,
            })
            .await?;

        let available = conflict::filter_available(candidates, &booked);
        debug!(
            "Service {} on {}: {} slots available, {} appointments booked",
            service_id,
            date,
            available.len(),
            booked.len()
        );
        Ok(available)
    }

    /// Availability on the shared calendar, ranked by adjacency.
    ///
    /// Appointments of every service block a candidate here and count towards
    /// its score.
    pub async fn smart_availability(&self, service_id: Uuid, date: NaiveDate) -> BookingResult<Vec<Slot>> {
        let day = Interval::day(date)?;
        let service = self.find_service(service_id).await?;
        let candidates = slots::generate_slots(service.duration_minutes, date, &self.config.working_hours);

        let booked = self
            .find_appointments(AppointmentFilter::All {
                range: day,
            })
            .await?;

        let available = conflict::filter_available(candidates, &booked);
        let ranked = ranker::rank_slots(available, &booked);
        debug!(
            "Smart availability for service {} on {}: {} slots",
            service_id,
            date,
            ranked.len()
        );
        Ok(ranked)
    }

    /// Books `request` unless it overlaps an existing appointment of the same
    /// service.
    ///
    /// The pre-check here rejects obvious conflicts cheaply; the store repeats
    /// it atomically with the insert, which is what actually guarantees that
    /// two concurrent requests for one slot cannot both succeed.
    pub async fn book_slot(&self, request: NewAppointment) -> BookingResult<Appointment> {
        let service = self.find_service(request.service_id).await?;

        let booked_minutes = request.interval.duration_minutes();
        if booked_minutes != i64::from(service.duration_minutes) {
            return Err(BookingError::InvalidInput(format!(
                "Booking lasts {} minutes but service {} takes {} minutes",
                booked_minutes, service.name, service.duration_minutes
            )));
        }

        let existing = self
            .find_appointments(AppointmentFilter::ForService {
                service_id: service.id,
                range: request.interval,
            })
            .await?;
        if let Some(conflicting) = conflict::find_conflict(&request.interval, &existing) {
            warn!(
                "Rejected booking for service {} at {}: overlaps appointment {}",
                service.id, request.interval.start, conflicting.id
            );
            return Err(BookingError::SlotUnavailable(format!(
                "The time slot starting at {} is already booked",
                request.interval.start.to_rfc3339()
            )));
        }

        let appointment = match self
            .with_timeout("create_appointment", self.store.create_appointment(request.clone()))
            .await
        {
            Ok(appointment) => appointment,
            Err(BookingError::SlotUnavailable(reason)) => {
                warn!("Booking for service {} lost a race at commit time", service.id);
                return Err(BookingError::SlotUnavailable(reason));
            }
            // The insert may have committed before the failure reached us
            Err(err) if err.is_retryable() => match self.find_committed(&request).await {
                Some(appointment) => {
                    warn!(
                        "Store call failed after booking {} was committed: {:?}",
                        appointment.id, err
                    );
                    appointment
                }
                None => return Err(err),
            },
            Err(err) => return Err(err),
        };

        info!(
            "Booked appointment {} for service {} from {} to {}",
            appointment.id, appointment.service_id, appointment.start_time, appointment.end_time
        );
        Ok(appointment)
    }

    /// The appointment `request` would have produced, if it is already stored.
    async fn find_committed(&self, request: &NewAppointment) -> Option<Appointment> {
        let stored = self
            .find_appointments(AppointmentFilter::ForService {
                service_id: request.service_id,
                range: request.interval,
            })
            .await
            .ok()?;

        stored.into_iter().find(|a| {
            a.interval() == request.interval
                && a.customer_name == request.customer_name
                && a.customer_email == request.customer_email
        })
    }
}
