// libs/scheduling-cell/src/models.rs
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Slot granularity for every doctor, in minutes.
pub const SLOT_INTERVAL_MINUTES: u32 = 30;

// ==============================================================================
// WEEKLY SCHEDULE MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Resolve the weekday for a calendar date.
    ///
    /// `NaiveDate::weekday` is plain calendar arithmetic on the civil date,
    /// so the result never depends on the host timezone.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        };
        write!(f, "{}", name)
    }
}

/// A doctor's working window for a single weekday.
///
/// When `is_off` is true the start/end values are ignored entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub is_off: bool,
}

/// Weekday name -> working hours. A missing day means the doctor is off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: HashMap<DayOfWeek, WorkingHours>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, day: DayOfWeek, hours: WorkingHours) {
        self.days.insert(day, hours);
    }

    pub fn for_day(&self, day: DayOfWeek) -> Option<&WorkingHours> {
        self.days.get(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = (&DayOfWeek, &WorkingHours)> {
        self.days.iter()
    }
}

impl FromIterator<(DayOfWeek, WorkingHours)> for WeeklySchedule {
    fn from_iter<I: IntoIterator<Item = (DayOfWeek, WorkingHours)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

// ==============================================================================
// APPOINTMENT OCCUPANCY MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rejected,
}

/// Statuses that hold a slot against new bookings. Everything else
/// (completed, cancelled, rejected) frees the slot for reuse.
pub const BLOCKING_STATUSES: [AppointmentStatus; 2] =
    [AppointmentStatus::Pending, AppointmentStatus::Confirmed];

impl AppointmentStatus {
    pub fn blocks_slot(&self) -> bool {
        BLOCKING_STATUSES.contains(self)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "Pending"),
            AppointmentStatus::Confirmed => write!(f, "Confirmed"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
            AppointmentStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// The engine's read-only view of a booked appointment.
///
/// The appointment cell owns the full record; the engine only ever needs
/// the conflict tuple plus id and status, so this trait is the seam
/// between them.
pub trait SlotOccupancy {
    fn appointment_id(&self) -> Uuid;
    fn doctor_id(&self) -> Uuid;
    fn date(&self) -> NaiveDate;
    fn time(&self) -> NaiveTime;
    fn status(&self) -> AppointmentStatus;
}

impl<T: SlotOccupancy> SlotOccupancy for &T {
    fn appointment_id(&self) -> Uuid {
        (**self).appointment_id()
    }
    fn doctor_id(&self) -> Uuid {
        (**self).doctor_id()
    }
    fn date(&self) -> NaiveDate {
        (**self).date()
    }
    fn time(&self) -> NaiveTime {
        (**self).time()
    }
    fn status(&self) -> AppointmentStatus {
        (**self).status()
    }
}

/// The doctor/date/time triple a caller wants to book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookingCandidate {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

/// The requested doctor/date/time is already held by an active appointment.
///
/// Always recoverable: the caller offers the user a different slot.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("doctor {doctor_id} already has an active appointment on {date} at {time}")]
pub struct ConflictError {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

// ==============================================================================
// SERDE HELPERS
// ==============================================================================

/// Wall-clock times cross the wire as "HH:mm".
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&value, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
