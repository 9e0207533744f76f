// libs/doctor-cell/src/services/directory.rs
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use scheduling_cell::models::WeeklySchedule;

use crate::models::{CreateDoctorRequest, Doctor, DoctorError, UpdateDoctorRequest};

/// In-process registry of doctor profiles and their weekly schedules.
///
/// Reads hand out cloned snapshots; the scheduling engine never touches
/// the registry directly.
pub struct DoctorDirectory {
    doctors: RwLock<HashMap<Uuid, Doctor>>,
}

impl DoctorDirectory {
    pub fn new() -> Self {
        Self {
            doctors: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        if request.name.trim().is_empty() {
            return Err(DoctorError::ValidationError("name must not be empty".into()));
        }
        if request.email.trim().is_empty() {
            return Err(DoctorError::ValidationError("email must not be empty".into()));
        }

        let now = Utc::now();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            specialty: request.specialty,
            address: request.address,
            fees: request.fees,
            mobile: request.mobile,
            hospital_name: request.hospital_name,
            profile_complete: request.profile_complete.unwrap_or(false),
            weekly_schedule: None,
            created_at: now,
            updated_at: now,
        };

        debug!("registering doctor {} ({})", doctor.id, doctor.name);
        self.doctors.write().await.insert(doctor.id, doctor.clone());
        Ok(doctor)
    }

    pub async fn get(&self, doctor_id: Uuid) -> Result<Doctor, DoctorError> {
        self.doctors
            .read()
            .await
            .get(&doctor_id)
            .cloned()
            .ok_or(DoctorError::NotFound)
    }

    pub async fn list(&self, bookable_only: bool) -> Vec<Doctor> {
        let mut doctors: Vec<Doctor> = self
            .doctors
            .read()
            .await
            .values()
            .filter(|doctor| !bookable_only || doctor.is_bookable())
            .cloned()
            .collect();
        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        doctors
    }

    pub async fn update(
        &self,
        doctor_id: Uuid,
        request: UpdateDoctorRequest,
    ) -> Result<Doctor, DoctorError> {
        let mut doctors = self.doctors.write().await;
        let doctor = doctors.get_mut(&doctor_id).ok_or(DoctorError::NotFound)?;

        if let Some(name) = request.name {
            doctor.name = name;
        }
        if let Some(specialty) = request.specialty {
            doctor.specialty = specialty;
        }
        if let Some(address) = request.address {
            doctor.address = address;
        }
        if let Some(fees) = request.fees {
            doctor.fees = fees;
        }
        if let Some(mobile) = request.mobile {
            doctor.mobile = mobile;
        }
        if let Some(hospital_name) = request.hospital_name {
            doctor.hospital_name = Some(hospital_name);
        }
        if let Some(profile_complete) = request.profile_complete {
            doctor.profile_complete = profile_complete;
        }
        doctor.updated_at = Utc::now();

        Ok(doctor.clone())
    }

    /// Replace a doctor's weekly working hours.
    ///
    /// Days marked off may carry any start/end values; working days must
    /// have a strictly positive window.
    pub async fn set_schedule(
        &self,
        doctor_id: Uuid,
        schedule: WeeklySchedule,
    ) -> Result<Doctor, DoctorError> {
        for (day, hours) in schedule.days() {
            if !hours.is_off && hours.start_time >= hours.end_time {
                return Err(DoctorError::InvalidSchedule(format!(
                    "{}: start time must be before end time",
                    day
                )));
            }
        }

        let mut doctors = self.doctors.write().await;
        let doctor = doctors.get_mut(&doctor_id).ok_or(DoctorError::NotFound)?;

        debug!("updating weekly schedule for doctor {}", doctor_id);
        doctor.weekly_schedule = Some(schedule);
        doctor.updated_at = Utc::now();

        Ok(doctor.clone())
    }

    /// Snapshot of a doctor's schedule for slot computation.
    pub async fn weekly_schedule(
        &self,
        doctor_id: Uuid,
    ) -> Result<Option<WeeklySchedule>, DoctorError> {
        let doctors = self.doctors.read().await;
        let doctor = doctors.get(&doctor_id).ok_or(DoctorError::NotFound)?;
        Ok(doctor.weekly_schedule.clone())
    }
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self::new()
    }
}
