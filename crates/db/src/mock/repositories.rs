use async_trait::async_trait;
use mockall::mock;
use slotbook_core::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, AppointmentDetails, NewAppointment},
        service::{NewService, Service},
    },
    store::{AppointmentFilter, BookingStore},
};
use uuid::Uuid;

// Mock store for testing code that sits on top of the engine
mock! {
    pub Store {}

    #[async_trait]
    impl BookingStore for Store {
        async fn find_service(&self, id: Uuid) -> BookingResult<Option<Service>>;

        async fn list_services(&self) -> BookingResult<Vec<Service>>;

        async fn create_service(&self, service: NewService) -> BookingResult<Service>;

        async fn find_appointments(
            &self,
            filter: AppointmentFilter,
        ) -> BookingResult<Vec<Appointment>>;

        async fn list_appointments(&self) -> BookingResult<Vec<AppointmentDetails>>;

        async fn create_appointment(
            &self,
            appointment: NewAppointment,
        ) -> BookingResult<Appointment>;
    }
}
