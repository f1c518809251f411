// --- File: crates/salonify_scheduling/src/availability.rs ---
use crate::overlap::{overlaps, overlaps_minutes};
use crate::time_grid::TimeGrid;
use salonify_common::models::{
    AppointmentBooking, DateKey, Interval, StaffId, TimeOfDay, MINUTES_PER_DAY,
};
use serde::Serialize;
use tracing::{debug, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Why a slot cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum BlockReason {
    /// The service would run past closing time.
    ExceedsBusinessHours,
    /// An existing booking overlaps the candidate interval.
    Occupied,
    /// Zero-length services are never bookable.
    InvalidDuration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotAvailability {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start_time: TimeOfDay,
    /// End of the candidate interval; absent when it would not fit the day.
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "10:00"))]
    pub end_time: Option<TimeOfDay>,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<BlockReason>,
}

/// Availability of every slot of one staff member's day for one service duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotGrid {
    pub staff_id: StaffId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date", example = "2025-05-05"))]
    pub date: DateKey,
    pub duration_minutes: u32,
    /// In grid order; empty on closed days.
    pub slots: Vec<SlotAvailability>,
}

impl SlotGrid {
    pub fn slot(&self, start: TimeOfDay) -> Option<&SlotAvailability> {
        self.slots.iter().find(|slot| slot.start_time == start)
    }

    pub fn is_available(&self, start: TimeOfDay) -> bool {
        self.slot(start).is_some_and(|slot| slot.available)
    }

    pub fn available_starts(&self) -> impl Iterator<Item = TimeOfDay> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.available)
            .map(|slot| slot.start_time)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Minute ranges `[start, end)` blocked by the relevant bookings of one staff day.
///
/// Only bookings of `staff_id` on `date` with a slot-blocking status count.
/// Malformed records fail closed: `start > end` blocks `[end, start)` and
/// `start == end` blocks one granularity step from `start`.
pub fn blocked_ranges(
    grid: &TimeGrid,
    staff_id: StaffId,
    date: DateKey,
    bookings: &[AppointmentBooking],
) -> Vec<(u32, u32)> {
    relevant(staff_id, date, bookings)
        .map(|b| blocked_range(grid, b))
        .collect()
}

fn relevant<'b>(
    staff_id: StaffId,
    date: DateKey,
    bookings: &'b [AppointmentBooking],
) -> impl Iterator<Item = &'b AppointmentBooking> {
    bookings
        .iter()
        .filter(move |b| b.staff_id == staff_id && b.date == date && b.status.blocks_slots())
}

fn blocked_range(grid: &TimeGrid, booking: &AppointmentBooking) -> (u32, u32) {
    let start = booking.start_time.to_minutes();
    let end = booking.end_time.to_minutes();
    if booking.is_well_formed() {
        return (start, end);
    }
    warn!(
        "Booking {} has malformed interval {}-{}, blocking conservatively",
        booking.id, booking.start_time, booking.end_time
    );
    if start > end {
        (end, start)
    } else {
        (start, start.saturating_add(grid.granularity_minutes()))
    }
}

/// Occupied minutes of a day as a prefix sum over minute ticks.
///
/// Two half-open minute ranges overlap iff they share a tick, so a range is
/// free iff its tick count is zero. This is exact, not an approximation.
struct Occupancy {
    prefix: Vec<u32>,
}

impl Occupancy {
    fn from_ranges(ranges: &[(u32, u32)]) -> Self {
        let day = MINUTES_PER_DAY as usize;
        let mut ticks = vec![false; day];
        for &(start, end) in ranges {
            let start = (start as usize).min(day);
            let end = (end as usize).min(day);
            for tick in ticks.iter_mut().take(end).skip(start) {
                *tick = true;
            }
        }

        let mut prefix = Vec::with_capacity(day + 1);
        prefix.push(0);
        let mut total = 0;
        for occupied in ticks {
            total += u32::from(occupied);
            prefix.push(total);
        }
        Self { prefix }
    }

    /// `start <= end <= MINUTES_PER_DAY`.
    fn is_free(&self, start: u32, end: u32) -> bool {
        self.prefix[end as usize] == self.prefix[start as usize]
    }
}

/// Computes slot availability from a grid and a snapshot of bookings.
///
/// Pure: it never fetches and never mutates. Bookings of other staff
/// members, other dates and non-blocking statuses are ignored, so callers may
/// pass an unfiltered list.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityCalculator<'a> {
    grid: &'a TimeGrid,
}

impl<'a> AvailabilityCalculator<'a> {
    pub fn new(grid: &'a TimeGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &'a TimeGrid {
        self.grid
    }

    pub fn calculate(
        &self,
        staff_id: StaffId,
        date: DateKey,
        duration_minutes: u32,
        bookings: &[AppointmentBooking],
    ) -> SlotGrid {
        let starts = self.grid.enumerate_slots(date);
        let ranges = blocked_ranges(self.grid, staff_id, date, bookings);
        let occupancy = Occupancy::from_ranges(&ranges);

        let slots: Vec<SlotAvailability> = starts
            .into_iter()
            .map(|start| {
                let end = self.grid.candidate_end(start, duration_minutes);
                let reason = match end {
                    _ if duration_minutes == 0 => Some(BlockReason::InvalidDuration),
                    None => Some(BlockReason::ExceedsBusinessHours),
                    Some(end) if !occupancy.is_free(start.to_minutes(), end.to_minutes()) => {
                        Some(BlockReason::Occupied)
                    }
                    Some(_) => None,
                };
                SlotAvailability {
                    start_time: start,
                    end_time: end,
                    available: reason.is_none(),
                    reason,
                }
            })
            .collect();

        let grid = SlotGrid {
            staff_id,
            date,
            duration_minutes,
            slots,
        };
        debug!(
            "Availability for staff {} on {} ({} min): {}/{} slots free, {} blocking ranges",
            staff_id,
            date,
            duration_minutes,
            grid.available_starts().count(),
            grid.len(),
            ranges.len()
        );
        grid
    }
}

/// Reference definition of availability for a single start.
///
/// Checks the candidate against every relevant booking with [`overlaps`];
/// malformed records are compared through their fail-closed range. The tick-based
/// [`AvailabilityCalculator::calculate`] must agree with it for every slot.
pub fn is_available_pairwise(
    grid: &TimeGrid,
    staff_id: StaffId,
    date: DateKey,
    start: TimeOfDay,
    duration_minutes: u32,
    bookings: &[AppointmentBooking],
) -> bool {
    if grid.is_closed(date) || !grid.is_slot_start(start) {
        return false;
    }
    let Some(end) = grid.candidate_end(start, duration_minutes) else {
        return false;
    };
    let Ok(candidate) = Interval::new(start, end) else {
        return false;
    };
    relevant(staff_id, date, bookings).all(|booking| match booking.interval() {
        Some(interval) => !overlaps(&candidate, &interval),
        None => !overlaps_minutes(
            (start.to_minutes(), end.to_minutes()),
            blocked_range(grid, booking),
        ),
    })
}
