// libs/doctor-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scheduling_cell::models::WeeklySchedule;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub address: String,
    pub fees: f64,
    pub mobile: String,
    pub hospital_name: Option<String>,
    /// Only doctors with a completed profile are offered for booking.
    pub profile_complete: bool,
    /// Absent schedule means no availability anywhere.
    pub weekly_schedule: Option<WeeklySchedule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    pub fn is_bookable(&self) -> bool {
        self.profile_complete
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub address: String,
    pub fees: f64,
    pub mobile: String,
    pub hospital_name: Option<String>,
    pub profile_complete: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub address: Option<String>,
    pub fees: Option<f64>,
    pub mobile: Option<String>,
    pub hospital_name: Option<String>,
    pub profile_complete: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDoctorsQuery {
    pub bookable_only: Option<bool>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
