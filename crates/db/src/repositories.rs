pub mod appointment;
pub mod service;
