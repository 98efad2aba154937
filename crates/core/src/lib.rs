//! # Slotbook Core
//!
//! Domain types and the availability & booking engine.
//!
//! - [`models`]: services, appointments, slots and the validated request types
//! - [`engine`]: interval overlap, slot generation, conflict filtering, smart
//!   ranking and the booking transaction
//! - [`store`]: the persistence boundary the engine is built against, plus an
//!   in-memory implementation

pub mod engine;
pub mod errors;
pub mod models;
pub mod store;
