// libs/appointment-cell/src/services/store.rs
use chrono::{NaiveDate, NaiveTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use scheduling_cell::models::{AppointmentStatus, BookingCandidate};
use scheduling_cell::services::slots::SlotEngine;

use crate::models::{Appointment, AppointmentError};
use crate::services::lifecycle::AppointmentLifecycleService;

/// The appointment store: the single writer for booking state.
///
/// Every write that claims a slot happens inside the write guard, and
/// re-validates against the contents it is about to change. Two racing
/// requests for the identical doctor/date/time therefore serialize, and
/// the loser gets a conflict instead of a silent double-booking.
pub struct AppointmentStore {
    engine: SlotEngine,
    lifecycle: AppointmentLifecycleService,
    appointments: RwLock<HashMap<Uuid, Appointment>>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self {
            engine: SlotEngine::new(),
            lifecycle: AppointmentLifecycleService::new(),
            appointments: RwLock::new(HashMap::new()),
        }
    }

    /// Point-in-time copy of every appointment, for slot computation and
    /// listings. The engine always works on snapshots like this one, not
    /// on the live map.
    pub async fn snapshot(&self) -> Vec<Appointment> {
        self.appointments.read().await.values().cloned().collect()
    }

    pub async fn get(&self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        self.appointments
            .read()
            .await
            .get(&appointment_id)
            .cloned()
            .ok_or(AppointmentError::NotFound)
    }

    /// Commit a new appointment, checking its slot inside the critical
    /// section.
    pub async fn create(&self, appointment: Appointment) -> Result<Appointment, AppointmentError> {
        let mut appointments = self.appointments.write().await;

        let candidate = BookingCandidate {
            doctor_id: appointment.doctor_id,
            date: appointment.date,
            time: appointment.time,
        };
        {
            let current: Vec<&Appointment> = appointments.values().collect();
            self.engine.validate_booking(&current, &candidate, None)?;
        }

        debug!(
            "created appointment {} for doctor {} on {} at {}",
            appointment.id, appointment.doctor_id, appointment.date, appointment.time
        );
        appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    /// Move an appointment to a new doctor/date/time, ignoring its own
    /// current slot when checking for conflicts.
    pub async fn reschedule(
        &self,
        appointment_id: Uuid,
        doctor_id: Option<Uuid>,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Appointment, AppointmentError> {
        let mut appointments = self.appointments.write().await;

        let target_doctor = match doctor_id {
            Some(doctor) => doctor,
            None => {
                appointments
                    .get(&appointment_id)
                    .ok_or(AppointmentError::NotFound)?
                    .doctor_id
            }
        };

        let candidate = BookingCandidate {
            doctor_id: target_doctor,
            date,
            time,
        };
        {
            let current: Vec<&Appointment> = appointments.values().collect();
            self.engine
                .validate_booking(&current, &candidate, Some(appointment_id))?;
        }

        let appointment = appointments
            .get_mut(&appointment_id)
            .ok_or(AppointmentError::NotFound)?;
        appointment.doctor_id = target_doctor;
        appointment.date = date;
        appointment.time = time;
        appointment.updated_at = Utc::now();

        debug!(
            "rescheduled appointment {} to doctor {} on {} at {}",
            appointment_id, target_doctor, date, time
        );
        Ok(appointment.clone())
    }

    pub async fn update_status(
        &self,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let mut appointments = self.appointments.write().await;
        let appointment = appointments
            .get_mut(&appointment_id)
            .ok_or(AppointmentError::NotFound)?;

        self.lifecycle
            .validate_status_transition(appointment.status, new_status)?;

        appointment.status = new_status;
        appointment.updated_at = Utc::now();
        Ok(appointment.clone())
    }
}

impl Default for AppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}
