// libs/appointment-cell/src/services/booking.rs
use chrono::{NaiveDate, NaiveTime, Utc};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use doctor_cell::services::directory::DoctorDirectory;
use scheduling_cell::models::AppointmentStatus;
use scheduling_cell::services::ordering::sort_chronologically;
use scheduling_cell::services::slots::SlotEngine;

use crate::models::{
    Appointment, AppointmentError, AppointmentSearchQuery, BookAppointmentRequest,
    RescheduleAppointmentRequest,
};
use crate::services::store::AppointmentStore;

/// Booking workflows over the doctor directory and the appointment store.
///
/// The slot engine is fed explicit snapshots of both collaborators on
/// every call; the service itself keeps no booking state.
pub struct AppointmentBookingService {
    engine: SlotEngine,
    directory: Arc<DoctorDirectory>,
    store: Arc<AppointmentStore>,
}

impl AppointmentBookingService {
    pub fn new(directory: Arc<DoctorDirectory>, store: Arc<AppointmentStore>) -> Self {
        Self {
            engine: SlotEngine::new(),
            directory,
            store,
        }
    }

    /// Book a new appointment. Starts out `Pending` until the doctor or
    /// a receptionist triages it.
    pub async fn book(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        if request.reason.trim().is_empty() {
            return Err(AppointmentError::ValidationError(
                "a reason for the visit is required".to_string(),
            ));
        }

        let doctor = self
            .directory
            .get(request.doctor_id)
            .await
            .map_err(|_| AppointmentError::DoctorNotFound)?;
        if !doctor.is_bookable() {
            return Err(AppointmentError::DoctorNotBookable);
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            date: request.date,
            time: request.time,
            reason: request.reason,
            status: AppointmentStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        debug!(
            "booking appointment for patient {} with doctor {} on {} at {}",
            appointment.patient_id, appointment.doctor_id, appointment.date, appointment.time
        );
        self.store.create(appointment).await
    }

    /// Open slots for a doctor on a date, for display to a booking user.
    pub async fn available_slots(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, AppointmentError> {
        let schedule = self
            .directory
            .weekly_schedule(doctor_id)
            .await
            .map_err(|_| AppointmentError::DoctorNotFound)?;
        let appointments = self.store.snapshot().await;

        Ok(self
            .engine
            .available_slots(schedule.as_ref(), &appointments, doctor_id, date))
    }

    /// Status-aware occupancy check, the one the submit path relies on.
    pub async fn is_slot_taken(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        exclude_appointment_id: Option<Uuid>,
    ) -> bool {
        let appointments = self.store.snapshot().await;
        self.engine
            .is_slot_taken(&appointments, doctor_id, date, time, exclude_appointment_id)
    }

    pub async fn get(&self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        self.store.get(appointment_id).await
    }

    pub async fn reschedule(
        &self,
        appointment_id: Uuid,
        request: RescheduleAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        if let Some(doctor_id) = request.doctor_id {
            let doctor = self
                .directory
                .get(doctor_id)
                .await
                .map_err(|_| AppointmentError::DoctorNotFound)?;
            if !doctor.is_bookable() {
                return Err(AppointmentError::DoctorNotBookable);
            }
        }

        self.store
            .reschedule(appointment_id, request.doctor_id, request.date, request.time)
            .await
    }

    pub async fn update_status(
        &self,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        self.store.update_status(appointment_id, new_status).await
    }

    pub async fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        self.store
            .update_status(appointment_id, AppointmentStatus::Cancelled)
            .await
    }

    /// Filtered listing in chronological order.
    pub async fn search(&self, query: &AppointmentSearchQuery) -> Vec<Appointment> {
        let appointments = self.store.snapshot().await;

        let filtered: Vec<Appointment> = appointments
            .into_iter()
            .filter(|appt| query.doctor_id.map_or(true, |d| appt.doctor_id == d))
            .filter(|appt| query.patient_id.map_or(true, |p| appt.patient_id == p))
            .filter(|appt| query.status.map_or(true, |s| appt.status == s))
            .collect();

        sort_chronologically(filtered, query.order.unwrap_or_default())
    }
}
