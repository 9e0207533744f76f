// libs/scheduling-cell/tests/slot_engine_test.rs
//
// End-to-end checks for the slot engine: a doctor's week of working
// hours, a set of bookings, and the full book -> conflict -> free cycle.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use scheduling_cell::models::{
    AppointmentStatus, BookingCandidate, DayOfWeek, SlotOccupancy, WeeklySchedule, WorkingHours,
};
use scheduling_cell::services::slots::SlotEngine;

struct Booking {
    id: Uuid,
    doctor_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
    status: AppointmentStatus,
}

impl SlotOccupancy for Booking {
    fn appointment_id(&self) -> Uuid {
        self.id
    }
    fn doctor_id(&self) -> Uuid {
        self.doctor_id
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn time(&self) -> NaiveTime {
        self.time
    }
    fn status(&self) -> AppointmentStatus {
        self.status
    }
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// 2024-08-12 is a Monday
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 12).unwrap()
}

#[test]
fn monday_only_doctor_full_booking_cycle() {
    let engine = SlotEngine::new();
    let doctor = Uuid::new_v4();

    // Doctor works Monday 09:00-11:00 only.
    let mut schedule = WeeklySchedule::new();
    schedule.set(
        DayOfWeek::Monday,
        WorkingHours {
            start_time: time(9, 0),
            end_time: time(11, 0),
            is_off: false,
        },
    );

    let mut appointments: Vec<Booking> = Vec::new();

    // Four open slots to start with.
    let slots = engine.available_slots(Some(&schedule), &appointments, doctor, monday());
    assert_eq!(
        slots,
        vec![time(9, 0), time(9, 30), time(10, 0), time(10, 30)]
    );

    // First request for Monday 09:00 succeeds.
    let candidate = BookingCandidate {
        doctor_id: doctor,
        date: monday(),
        time: time(9, 0),
    };
    engine
        .validate_booking(&appointments, &candidate, None)
        .expect("slot should be free");
    let first = Booking {
        id: Uuid::new_v4(),
        doctor_id: doctor,
        date: monday(),
        time: time(9, 0),
        status: AppointmentStatus::Pending,
    };
    let first_id = first.id;
    appointments.push(first);

    // A second request for the same triple fails while the first is pending.
    let err = engine
        .validate_booking(&appointments, &candidate, None)
        .unwrap_err();
    assert_eq!(err.date, monday());
    assert_eq!(err.time, time(9, 0));

    // 09:00 disappears from the open slots.
    let slots = engine.available_slots(Some(&schedule), &appointments, doctor, monday());
    assert_eq!(slots, vec![time(9, 30), time(10, 0), time(10, 30)]);

    // Once the first booking is rejected, the same request succeeds again.
    appointments
        .iter_mut()
        .find(|appt| appt.id == first_id)
        .unwrap()
        .status = AppointmentStatus::Rejected;

    engine
        .validate_booking(&appointments, &candidate, None)
        .expect("rejected appointment must free its slot");
}

#[test]
fn weekday_resolution_is_calendar_based() {
    // A tour through one week, anchored on known dates.
    let days = [
        (NaiveDate::from_ymd_opt(2024, 8, 11).unwrap(), DayOfWeek::Sunday),
        (NaiveDate::from_ymd_opt(2024, 8, 12).unwrap(), DayOfWeek::Monday),
        (NaiveDate::from_ymd_opt(2024, 8, 13).unwrap(), DayOfWeek::Tuesday),
        (NaiveDate::from_ymd_opt(2024, 8, 14).unwrap(), DayOfWeek::Wednesday),
        (NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(), DayOfWeek::Thursday),
        (NaiveDate::from_ymd_opt(2024, 8, 16).unwrap(), DayOfWeek::Friday),
        (NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(), DayOfWeek::Saturday),
    ];

    for (date, expected) in days {
        assert_eq!(DayOfWeek::from_date(date), expected);
    }
}

#[test]
fn schedule_round_trips_with_wall_clock_times() {
    let json = r#"{
        "Monday": { "start_time": "09:00", "end_time": "17:00", "is_off": false },
        "Tuesday": { "start_time": "10:00", "end_time": "14:30", "is_off": false },
        "Sunday": { "start_time": "00:00", "end_time": "00:00", "is_off": true }
    }"#;

    let schedule: WeeklySchedule = serde_json::from_str(json).expect("HH:mm times parse");

    let monday_hours = schedule.for_day(DayOfWeek::Monday).unwrap();
    assert_eq!(monday_hours.start_time, time(9, 0));
    assert_eq!(monday_hours.end_time, time(17, 0));
    assert!(schedule.for_day(DayOfWeek::Sunday).unwrap().is_off);
    assert!(schedule.for_day(DayOfWeek::Friday).is_none());

    let encoded = serde_json::to_value(&schedule).unwrap();
    assert_eq!(encoded["Monday"]["start_time"], "09:00");
    assert_eq!(encoded["Tuesday"]["end_time"], "14:30");
}
