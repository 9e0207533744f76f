use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use appointment_cell::services::booking::AppointmentBookingService;
use doctor_cell::router::doctor_routes;
use doctor_cell::services::directory::DoctorDirectory;

pub fn create_router(
    directory: Arc<DoctorDirectory>,
    booking: Arc<AppointmentBookingService>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "CareConnect Clinic API is running!" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api/doctors", doctor_routes(directory))
        .nest("/api/appointments", appointment_routes(booking))
}
