// libs/scheduling-cell/src/services/ordering.rs
use crate::models::{SlotOccupancy, SortDirection};

/// Order appointments by their combined (date, time) key.
///
/// The sort is stable: entries sharing a date and time keep their input
/// order, so listings are reproducible. Presentation only; nothing
/// safety-critical hangs off this ordering.
pub fn sort_chronologically<T: SlotOccupancy>(
    mut items: Vec<T>,
    direction: SortDirection,
) -> Vec<T> {
    match direction {
        SortDirection::Ascending => {
            items.sort_by(|a, b| (a.date(), a.time()).cmp(&(b.date(), b.time())));
        }
        SortDirection::Descending => {
            items.sort_by(|a, b| (b.date(), b.time()).cmp(&(a.date(), a.time())));
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    }

    impl Entry {
        fn new(date: (i32, u32, u32), time: (u32, u32)) -> Self {
            Self {
                id: Uuid::new_v4(),
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                time: NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
            }
        }
    }

    impl SlotOccupancy for Entry {
        fn appointment_id(&self) -> Uuid {
            self.id
        }
        fn doctor_id(&self) -> Uuid {
            Uuid::nil()
        }
        fn date(&self) -> NaiveDate {
            self.date
        }
        fn time(&self) -> NaiveTime {
            self.time
        }
        fn status(&self) -> AppointmentStatus {
            AppointmentStatus::Pending
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new((2024, 8, 15), (16, 0)),
            Entry::new((2024, 8, 10), (11, 0)),
            Entry::new((2024, 8, 12), (9, 0)),
            Entry::new((2024, 8, 10), (10, 0)),
        ]
    }

    #[test]
    fn ascending_orders_by_date_then_time() {
        let sorted = sort_chronologically(sample(), SortDirection::Ascending);

        let keys: Vec<_> = sorted.iter().map(|e| (e.date, e.time)).collect();
        let mut expected = keys.clone();
        expected.sort();
        assert_eq!(keys, expected);
    }

    #[test]
    fn sorting_a_sorted_list_is_idempotent() {
        let sorted = sort_chronologically(sample(), SortDirection::Ascending);
        let resorted = sort_chronologically(sorted.clone(), SortDirection::Ascending);

        assert_eq!(sorted, resorted);
    }

    #[test]
    fn descending_equals_reversed_ascending() {
        let ascending = sort_chronologically(sample(), SortDirection::Ascending);
        let descending = sort_chronologically(sample(), SortDirection::Descending);

        let mut reversed = ascending;
        reversed.reverse();
        assert_eq!(reversed, descending);
    }

    #[test]
    fn ties_keep_their_input_order() {
        let first = Entry::new((2024, 8, 10), (10, 0));
        let second = Entry::new((2024, 8, 10), (10, 0));
        let items = vec![first.clone(), second.clone()];

        let sorted = sort_chronologically(items, SortDirection::Ascending);

        assert_eq!(sorted[0].id, first.id);
        assert_eq!(sorted[1].id, second.id);
    }
}
