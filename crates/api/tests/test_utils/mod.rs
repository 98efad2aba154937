use std::sync::Arc;

use axum_test::TestServer;
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name},
    Fake,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use slotbook_api::{router, ApiState};
use slotbook_core::{
    engine::{BookingEngine, EngineConfig},
    models::service::{NewService, Service},
    store::{memory::InMemoryStore, BookingStore},
};
use uuid::Uuid;

pub const DATE: &str = "2025-03-10";

pub struct TestContext {
    pub engine: BookingEngine,
    pub server: TestServer,
}

impl TestContext {
    /// Server backed by a fresh in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn BookingStore>) -> Self {
        let engine = BookingEngine::new(store, EngineConfig::default());
        let state = Arc::new(ApiState {
            engine: engine.clone(),
        });
        let server = TestServer::new(router(state)).expect("Failed to start test server");
        Self { engine, server }
    }

    pub async fn seed_service(&self, name: &str, duration_minutes: u32) -> Service {
        self.engine
            .create_service(NewService {
                name: name.to_string(),
                price: dec!(35.00),
                duration_minutes,
                available: true,
            })
            .await
            .expect("Failed to seed service")
    }
}

/// `YYYY-MM-DDTHH:MM:00Z` on the shared test date
pub fn at(time: &str) -> String {
    format!("{DATE}T{time}:00Z")
}

/// Booking body for a random customer
pub fn booking_body(service_id: Uuid, start: &str, end: &str) -> Value {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    json!({
        "serviceId": service_id,
        "customerName": name,
        "customerEmail": email,
        "startTime": at(start),
        "endTime": at(end),
    })
}
