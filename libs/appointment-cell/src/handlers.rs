// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    Appointment, AppointmentError, AppointmentSearchQuery, BookAppointmentRequest,
    ConflictCheckQuery, RescheduleAppointmentRequest, SlotQuery, UpdateStatusRequest,
};
use crate::services::booking::AppointmentBookingService;

fn map_appointment_error(error: AppointmentError) -> AppError {
    match error {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        AppointmentError::DoctorNotBookable => {
            AppError::ValidationError("Doctor is not accepting bookings".to_string())
        }
        AppointmentError::SlotConflict(conflict) => AppError::Conflict(conflict.to_string()),
        AppointmentError::InvalidStatusTransition { .. } => {
            AppError::BadRequest(error.to_string())
        }
        AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
    }
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = service
        .book(request)
        .await
        .map_err(map_appointment_error)?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn search_appointments(
    State(service): State<Arc<AppointmentBookingService>>,
    Query(query): Query<AppointmentSearchQuery>,
) -> Json<Vec<Appointment>> {
    Json(service.search(&query).await)
}

/// Bookable "HH:mm" slot strings for one doctor and date.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(service): State<Arc<AppointmentBookingService>>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let slots = service
        .available_slots(query.doctor_id, query.date)
        .await
        .map_err(map_appointment_error)?;

    let slots: Vec<String> = slots
        .iter()
        .map(|slot| slot.format("%H:%M").to_string())
        .collect();

    Ok(Json(json!({
        "doctor_id": query.doctor_id,
        "date": query.date,
        "slots": slots,
    })))
}

#[axum::debug_handler]
pub async fn check_slot_conflict(
    State(service): State<Arc<AppointmentBookingService>>,
    Query(query): Query<ConflictCheckQuery>,
) -> Json<Value> {
    let taken = service
        .is_slot_taken(
            query.doctor_id,
            query.date,
            query.time,
            query.exclude_appointment_id,
        )
        .await;

    Json(json!({ "taken": taken }))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = service
        .get(appointment_id)
        .await
        .map_err(map_appointment_error)?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(service): State<Arc<AppointmentBookingService>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = service
        .update_status(appointment_id, request.status)
        .await
        .map_err(map_appointment_error)?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = service
        .reschedule(appointment_id, request)
        .await
        .map_err(map_appointment_error)?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = service
        .cancel(appointment_id)
        .await
        .map_err(map_appointment_error)?;
    Ok(Json(appointment))
}
