// libs/scheduling-cell/src/services/slots.rs
use chrono::{NaiveDate, NaiveTime, Timelike};
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{
    BookingCandidate, ConflictError, DayOfWeek, SlotOccupancy, WeeklySchedule, WorkingHours,
    SLOT_INTERVAL_MINUTES,
};

/// Pure slot computation over explicit snapshots.
///
/// Every operation is a function of its arguments: the engine holds no
/// state, performs no I/O, and is safe to call from any request handler.
/// Malformed schedule data (missing days, inverted windows) degrades to
/// "no slots" rather than an error; the only failure the engine ever
/// raises is [`ConflictError`] from [`SlotEngine::validate_booking`].
pub struct SlotEngine;

impl SlotEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the open slot-start times for a doctor on a calendar date.
    ///
    /// Slots step through the doctor's working window at the fixed
    /// interval; a trailing partial window is truncated. Times held by
    /// any appointment for this doctor and date are removed regardless
    /// of status; the authoritative booking gate is
    /// [`SlotEngine::validate_booking`], which is status-aware.
    pub fn available_slots<T: SlotOccupancy>(
        &self,
        schedule: Option<&WeeklySchedule>,
        appointments: &[T],
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Vec<NaiveTime> {
        let day = DayOfWeek::from_date(date);

        let Some(hours) = schedule.and_then(|s| s.for_day(day)) else {
            debug!("doctor {} has no working hours on {}", doctor_id, day);
            return Vec::new();
        };

        if hours.is_off {
            debug!("doctor {} is off on {}", doctor_id, day);
            return Vec::new();
        }

        let occupied: HashSet<NaiveTime> = appointments
            .iter()
            .filter(|appt| appt.doctor_id() == doctor_id && appt.date() == date)
            .map(|appt| appt.time())
            .collect();

        slot_starts(hours)
            .filter(|slot| !occupied.contains(slot))
            .collect()
    }

    /// True iff an active appointment holds the doctor/date/time triple.
    ///
    /// `exclude_appointment_id` lets an edit ignore its own prior slot,
    /// so a no-op reschedule to the same time succeeds.
    pub fn is_slot_taken<T: SlotOccupancy>(
        &self,
        appointments: &[T],
        doctor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        exclude_appointment_id: Option<Uuid>,
    ) -> bool {
        appointments.iter().any(|appt| {
            appt.doctor_id() == doctor_id
                && appt.date() == date
                && appt.time() == time
                && exclude_appointment_id != Some(appt.appointment_id())
                && appt.status().blocks_slot()
        })
    }

    /// Gate a create or reschedule against double-booking.
    ///
    /// Every code path that persists a new appointment, or an update that
    /// changes doctor/date/time, must call this first and surface the
    /// error unchanged.
    pub fn validate_booking<T: SlotOccupancy>(
        &self,
        appointments: &[T],
        candidate: &BookingCandidate,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<(), ConflictError> {
        if self.is_slot_taken(
            appointments,
            candidate.doctor_id,
            candidate.date,
            candidate.time,
            exclude_appointment_id,
        ) {
            warn!(
                "booking conflict: doctor {} on {} at {}",
                candidate.doctor_id, candidate.date, candidate.time
            );
            return Err(ConflictError {
                doctor_id: candidate.doctor_id,
                date: candidate.date,
                time: candidate.time,
            });
        }

        Ok(())
    }
}

impl Default for SlotEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Slot starts from `start_time` while a full interval still fits before
/// `end_time`. Runs on seconds-from-midnight because `NaiveTime`
/// addition wraps at midnight; an inverted window yields nothing.
fn slot_starts(hours: &WorkingHours) -> impl Iterator<Item = NaiveTime> {
    let step = SLOT_INTERVAL_MINUTES * 60;
    let start = hours.start_time.num_seconds_from_midnight();
    let end = hours.end_time.num_seconds_from_midnight();

    (start..)
        .step_by(step as usize)
        .take_while(move |t| t + step <= end)
        .filter_map(|t| NaiveTime::from_num_seconds_from_midnight_opt(t, 0))
}
