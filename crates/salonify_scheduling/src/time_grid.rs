// --- File: crates/salonify_scheduling/src/time_grid.rs ---
//! The bookable time grid of a business day.
//!
//! A grid is defined by business hours, a slot granularity and the weekdays
//! on which the salon is closed. Slot starts are every `granularity` minutes
//! from opening time, strictly before closing time.

use crate::error::SchedulingError;
use chrono::Weekday;
use salonify_common::models::{DateKey, TimeOfDay};
use salonify_config::SchedulingConfig;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    business_start: TimeOfDay,
    business_end: TimeOfDay,
    granularity_minutes: u32,
    closed_weekdays: Vec<Weekday>,
}

impl Default for TimeGrid {
    /// 09:00-18:00 in 30-minute steps, closed on Sundays.
    fn default() -> Self {
        Self {
            business_start: TimeOfDay::hm(9, 0),
            business_end: TimeOfDay::hm(18, 0),
            granularity_minutes: 30,
            closed_weekdays: vec![Weekday::Sun],
        }
    }
}

impl TimeGrid {
    pub fn new(
        business_start: TimeOfDay,
        business_end: TimeOfDay,
        granularity_minutes: u32,
        closed_weekdays: impl IntoIterator<Item = Weekday>,
    ) -> Result<Self, SchedulingError> {
        if granularity_minutes == 0 {
            return Err(SchedulingError::InvalidGranularity);
        }
        if business_start >= business_end {
            return Err(SchedulingError::InvalidBusinessHours {
                start: business_start,
                end: business_end,
            });
        }
        let mut closed_weekdays: Vec<Weekday> = closed_weekdays.into_iter().collect();
        closed_weekdays.sort_by_key(|day| day.num_days_from_monday());
        closed_weekdays.dedup();

        Ok(Self {
            business_start,
            business_end,
            granularity_minutes,
            closed_weekdays,
        })
    }

    pub fn from_config(config: &SchedulingConfig) -> Result<Self, SchedulingError> {
        let start = TimeOfDay::from_str(&config.business_start)?;
        let end = TimeOfDay::from_str(&config.business_end)?;
        Self::new(
            start,
            end,
            config.granularity_minutes,
            config.closed_weekdays.iter().copied(),
        )
    }

    pub fn business_start(&self) -> TimeOfDay {
        self.business_start
    }

    pub fn business_end(&self) -> TimeOfDay {
        self.business_end
    }

    pub fn granularity_minutes(&self) -> u32 {
        self.granularity_minutes
    }

    pub fn closed_weekdays(&self) -> &[Weekday] {
        &self.closed_weekdays
    }

    pub fn is_closed(&self, date: DateKey) -> bool {
        self.closed_weekdays.contains(&date.weekday())
    }

    /// Slot starts of an open day, independent of any date.
    pub fn slot_starts(&self) -> SlotStarts {
        SlotStarts {
            next: self.business_start.to_minutes(),
            end: self.business_end.to_minutes(),
            step: self.granularity_minutes,
        }
    }

    /// Ordered slot starts for `date`; empty when the salon is closed that day.
    pub fn enumerate_slots(&self, date: DateKey) -> Vec<TimeOfDay> {
        if self.is_closed(date) {
            return Vec::new();
        }
        self.slot_starts().collect()
    }

    /// True iff `time` is one of the grid's slot starts.
    pub fn is_slot_start(&self, time: TimeOfDay) -> bool {
        let minutes = time.to_minutes();
        let open = self.business_start.to_minutes();
        minutes >= open
            && time < self.business_end
            && (minutes - open) % self.granularity_minutes == 0
    }

    /// True iff `[start, start + duration)` lies within business hours.
    ///
    /// Ending exactly at closing time fits.
    pub fn fits(&self, start: TimeOfDay, duration_minutes: u32) -> bool {
        let start_minutes = start.to_minutes();
        start >= self.business_start
            && duration_minutes > 0
            && start_minutes
                .checked_add(duration_minutes)
                .is_some_and(|end| end <= self.business_end.to_minutes())
    }

    /// End time of a fitting candidate, `None` when it would not fit.
    pub fn candidate_end(&self, start: TimeOfDay, duration_minutes: u32) -> Option<TimeOfDay> {
        if self.fits(start, duration_minutes) {
            start.checked_add_minutes(duration_minutes)
        } else {
            None
        }
    }

    pub fn to_minutes(time: TimeOfDay) -> u32 {
        time.to_minutes()
    }

    pub fn from_minutes(minutes: u32) -> Option<TimeOfDay> {
        TimeOfDay::from_minutes(minutes)
    }
}

/// Iterator over slot starts, see [`TimeGrid::slot_starts`].
#[derive(Debug, Clone)]
pub struct SlotStarts {
    next: u32,
    end: u32,
    step: u32,
}

impl Iterator for SlotStarts {
    type Item = TimeOfDay;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let current = TimeOfDay::from_minutes(self.next)?;
        self.next = self.next.saturating_add(self.step);
        Some(current)
    }
}
