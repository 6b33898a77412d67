use time::{Date, OffsetDateTime, Time};

use crate::models::Reservation;

/// Width of a display slot. Purely a rendering concept, never stored.
pub const SLOT_MINUTES: u8 = 30;

/// A fixed display bucket of a day, labelled "HH:MM".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: Time,
    pub label: String,
}

/// The 48 half-hour slots from 00:00 to 23:30.
pub fn day_slots() -> Vec<TimeSlot> {
    let mut slots = Vec::with_capacity(48);
    for hour in 0..24u8 {
        for minute in [0, SLOT_MINUTES] {
            let time = Time::from_hms(hour, minute, 0).expect("static slot time");
            slots.push(TimeSlot {
                time,
                label: format!("{:02}:{:02}", hour, minute),
            });
        }
    }
    slots
}

/// Occupancy of one slot for one equipment on the selected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOccupancy {
    pub label: String,
    pub reserved: bool,
    pub user_id: Option<i64>,
}

/// Derive per-slot occupancy for an equipment on a given date.
///
/// A slot counts as reserved when its instant falls within an active
/// reservation's closed `[start, end]` interval and that reservation starts
/// on the selected date. The inclusive test is deliberate: it is the display
/// semantic, not the booking-conflict semantic.
pub fn slot_occupancy(
    equipment_id: i64,
    date: Date,
    reservations: &[Reservation],
) -> Vec<SlotOccupancy> {
    day_slots()
        .into_iter()
        .map(|slot| {
            let instant = date.with_time(slot.time).assume_utc();
            let holder = reservations.iter().find(|r| {
                r.equipment_id == equipment_id
                    && r.is_active()
                    && r.start_time.date() == date
                    && r.interval().covers_inclusive(instant)
            });
            SlotOccupancy {
                label: slot.label,
                reserved: holder.is_some(),
                user_id: holder.map(|r| r.user_id),
            }
        })
        .collect()
}

/// The user currently occupying the equipment, if any — drives the
/// floor-plan "in use" badge.
pub fn current_user(
    equipment_id: i64,
    now: OffsetDateTime,
    reservations: &[Reservation],
) -> Option<i64> {
    reservations
        .iter()
        .find(|r| {
            r.equipment_id == equipment_id && r.is_active() && r.interval().covers_inclusive(now)
        })
        .map(|r| r.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn reservation(
        equipment_id: i64,
        user_id: i64,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Reservation {
        Reservation {
            id: 1,
            equipment_id,
            user_id,
            start_time: start,
            end_time: end,
            status: "active".to_string(),
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn day_has_48_slots() {
        let slots = day_slots();
        assert_eq!(slots.len(), 48);
        assert_eq!(slots[0].label, "00:00");
        assert_eq!(slots[1].label, "00:30");
        assert_eq!(slots[47].label, "23:30");
    }

    #[test]
    fn slots_inside_reservation_are_reserved() {
        let res = vec![reservation(
            1,
            7,
            datetime!(2025-03-01 10:00 UTC),
            datetime!(2025-03-01 11:00 UTC),
        )];
        let grid = slot_occupancy(1, date!(2025-03-01), &res);

        let by_label = |label: &str| grid.iter().find(|s| s.label == label).unwrap();
        assert!(by_label("10:00").reserved);
        assert!(by_label("10:30").reserved);
        // Inclusive end: the 11:00 slot still reads as occupied on the grid.
        assert!(by_label("11:00").reserved);
        assert!(!by_label("11:30").reserved);
        assert!(!by_label("09:30").reserved);
        assert_eq!(by_label("10:00").user_id, Some(7));
    }

    #[test]
    fn other_equipment_not_reserved() {
        let res = vec![reservation(
            1,
            7,
            datetime!(2025-03-01 10:00 UTC),
            datetime!(2025-03-01 11:00 UTC),
        )];
        let grid = slot_occupancy(2, date!(2025-03-01), &res);
        assert!(grid.iter().all(|s| !s.reserved));
    }

    #[test]
    fn other_day_not_reserved() {
        let res = vec![reservation(
            1,
            7,
            datetime!(2025-03-01 10:00 UTC),
            datetime!(2025-03-01 11:00 UTC),
        )];
        let grid = slot_occupancy(1, date!(2025-03-02), &res);
        assert!(grid.iter().all(|s| !s.reserved));
    }

    #[test]
    fn cancelled_reservation_does_not_occupy() {
        let mut r = reservation(
            1,
            7,
            datetime!(2025-03-01 10:00 UTC),
            datetime!(2025-03-01 11:00 UTC),
        );
        r.status = "cancelled".to_string();
        let grid = slot_occupancy(1, date!(2025-03-01), &[r]);
        assert!(grid.iter().all(|s| !s.reserved));
    }

    #[test]
    fn current_user_during_and_outside() {
        let res = vec![reservation(
            1,
            7,
            datetime!(2025-03-01 10:00 UTC),
            datetime!(2025-03-01 11:00 UTC),
        )];
        assert_eq!(
            current_user(1, datetime!(2025-03-01 10:30 UTC), &res),
            Some(7)
        );
        assert_eq!(current_user(1, datetime!(2025-03-01 12:00 UTC), &res), None);
        assert_eq!(current_user(2, datetime!(2025-03-01 10:30 UTC), &res), None);
    }
}
