// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use scheduling_cell::models::WeeklySchedule;
use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, Doctor, DoctorError, ListDoctorsQuery, UpdateDoctorRequest};
use crate::services::directory::DoctorDirectory;

fn map_doctor_error(error: DoctorError) -> AppError {
    match error {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::InvalidSchedule(msg) => AppError::ValidationError(msg),
        DoctorError::ValidationError(msg) => AppError::ValidationError(msg),
    }
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(directory): State<Arc<DoctorDirectory>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = directory.create(request).await.map_err(map_doctor_error)?;
    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(directory): State<Arc<DoctorDirectory>>,
    Query(query): Query<ListDoctorsQuery>,
) -> Json<Vec<Doctor>> {
    let doctors = directory.list(query.bookable_only.unwrap_or(false)).await;
    Json(doctors)
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(directory): State<Arc<DoctorDirectory>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = directory.get(doctor_id).await.map_err(map_doctor_error)?;
    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(directory): State<Arc<DoctorDirectory>>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<UpdateDoctorRequest>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = directory
        .update(doctor_id, request)
        .await
        .map_err(map_doctor_error)?;
    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(directory): State<Arc<DoctorDirectory>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<WeeklySchedule>, AppError> {
    let schedule = directory
        .weekly_schedule(doctor_id)
        .await
        .map_err(map_doctor_error)?;
    Ok(Json(schedule.unwrap_or_default()))
}

#[axum::debug_handler]
pub async fn set_schedule(
    State(directory): State<Arc<DoctorDirectory>>,
    Path(doctor_id): Path<Uuid>,
    Json(schedule): Json<WeeklySchedule>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = directory
        .set_schedule(doctor_id, schedule)
        .await
        .map_err(map_doctor_error)?;
    Ok(Json(doctor))
}
