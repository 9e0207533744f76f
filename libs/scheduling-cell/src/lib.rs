pub mod models;
pub mod services;

pub use models::*;
pub use services::*;

// Specifically re-export the scheduling primitives used across cells
pub use models::{
    AppointmentStatus, BookingCandidate, ConflictError, DayOfWeek,
    SlotOccupancy, SortDirection, WeeklySchedule, WorkingHours,
    BLOCKING_STATUSES, SLOT_INTERVAL_MINUTES,
};
