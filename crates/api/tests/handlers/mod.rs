mod appointment_test;
mod availability_test;
mod middleware_test;
mod service_test;
