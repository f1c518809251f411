#[cfg(test)]
mod tests {
    use crate::availability::{is_available_pairwise, AvailabilityCalculator};
    use crate::overlap::overlaps;
    use crate::time_grid::TimeGrid;
    use crate::validator::{BookingProposal, BookingValidator};
    use chrono::Weekday;
    use proptest::prelude::*;
    use salonify_common::models::{
        AppointmentBooking, BookingStatus, DateKey, ServiceCatalog, ServiceCategory, ServiceSpec,
        TimeOfDay,
    };

    // Monday
    fn day() -> DateKey {
        DateKey::new(2025, 5, 5).unwrap()
    }

    fn status_strategy() -> impl Strategy<Value = BookingStatus> {
        prop_oneof![
            3 => Just(BookingStatus::Scheduled),
            1 => Just(BookingStatus::Cancelled),
            1 => Just(BookingStatus::Completed),
        ]
    }

    // Arbitrary bookings, including malformed ones (start >= end) and other staff
    fn booking_strategy() -> impl Strategy<Value = AppointmentBooking> {
        (0u32..1440, 0u32..1440, 1i64..=2, status_strategy()).prop_map(
            |(start, end, staff_id, status)| AppointmentBooking {
                id: 0,
                staff_id,
                customer_id: 1,
                service_id: 1,
                date: day(),
                start_time: TimeOfDay::from_minutes(start).unwrap(),
                end_time: TimeOfDay::from_minutes(end).unwrap(),
                status,
            },
        )
    }

    // Random but valid grids: open <= 12:00, close after open, granularity 5..=60
    fn grid_strategy() -> impl Strategy<Value = TimeGrid> {
        (0u32..=720, 60u32..=720, 5u32..=60).prop_map(|(open, length, step)| {
            TimeGrid::new(
                TimeOfDay::from_minutes(open).unwrap(),
                TimeOfDay::from_minutes((open + length).min(1439)).unwrap(),
                step,
                [Weekday::Sun],
            )
            .unwrap()
        })
    }

    fn catalog(durations: &[u32]) -> ServiceCatalog {
        ServiceCatalog::new(durations.iter().enumerate().map(|(i, &minutes)| ServiceSpec {
            id: i as i64 + 1,
            name: format!("Service {}", i + 1),
            description: String::new(),
            price: 1000,
            duration_minutes: minutes,
            category: ServiceCategory::Treatment,
        }))
        .unwrap()
    }

    proptest! {
        // The grid always has one entry per enumerated slot
        #[test]
        fn test_grid_completeness(
            grid in grid_strategy(),
            duration in 0u32..240,
            day_offset in 0u32..7,
            bookings in prop::collection::vec(booking_strategy(), 0..12),
        ) {
            let date = day().checked_add_days(day_offset).unwrap();
            let slots = AvailabilityCalculator::new(&grid).calculate(1, date, duration, &bookings);

            prop_assert_eq!(slots.len(), grid.enumerate_slots(date).len());
            let starts: Vec<TimeOfDay> = slots.slots.iter().map(|s| s.start_time).collect();
            prop_assert_eq!(starts, grid.enumerate_slots(date));
        }

        // Minute-tick occupancy agrees with the pairwise overlap definition
        #[test]
        fn test_ticks_agree_with_pairwise_overlap(
            grid in grid_strategy(),
            duration in 1u32..240,
            bookings in prop::collection::vec(booking_strategy(), 0..12),
        ) {
            let slots = AvailabilityCalculator::new(&grid).calculate(1, day(), duration, &bookings);

            for slot in &slots.slots {
                let reference = is_available_pairwise(&grid, 1, day(), slot.start_time, duration, &bookings);
                prop_assert_eq!(slot.available, reference, "slot {}", slot.start_time);
            }
        }

        // Bookings accepted one after another never overlap each other
        #[test]
        fn test_accepted_bookings_never_overlap(
            requests in prop::collection::vec((0usize..18, 0usize..3), 1..40),
        ) {
            let validator = BookingValidator::new(TimeGrid::default(), 30);
            let catalog = catalog(&[30, 45, 90]);
            let starts = validator.grid().enumerate_slots(day());
            let mut accepted: Vec<AppointmentBooking> = Vec::new();

            for (slot_index, service_index) in requests {
                let proposal = BookingProposal {
                    staff_id: Some(1),
                    service_id: Some(service_index as i64 + 1),
                    date: Some(day()),
                    start_time: Some(starts[slot_index]),
                    customer_id: Some(1),
                };
                if let Ok(validated) = validator.validate_on(day(), &proposal, &accepted, &catalog) {
                    accepted.push(AppointmentBooking {
                        id: accepted.len() as i64 + 1,
                        staff_id: validated.staff_id,
                        customer_id: 1,
                        service_id: validated.service_id,
                        date: validated.date,
                        start_time: validated.interval.start(),
                        end_time: validated.interval.end(),
                        status: BookingStatus::Scheduled,
                    });
                }
            }

            for (i, a) in accepted.iter().enumerate() {
                for b in accepted.iter().skip(i + 1) {
                    let (ia, ib) = (a.interval().unwrap(), b.interval().unwrap());
                    prop_assert!(!overlaps(&ia, &ib), "{} overlaps {}", ia, ib);
                }
            }
        }
    }
}
