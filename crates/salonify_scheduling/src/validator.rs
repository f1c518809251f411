// --- File: crates/salonify_scheduling/src/validator.rs ---
//! Booking validation.
//!
//! Checks run in a fixed order and the first failure is reported:
//! missing fields, unknown service, closed or out-of-window date, business
//! hours, grid alignment, and finally slot conflicts.

use crate::availability::AvailabilityCalculator;
use crate::error::SchedulingError;
use crate::time_grid::TimeGrid;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use chrono_tz::Tz;
use salonify_common::models::{
    AppointmentBooking, CustomerId, DateKey, Interval, ServiceCatalog, ServiceId, StaffId,
    TimeOfDay,
};
use salonify_common::SalonifyError;
use salonify_config::SchedulingConfig;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A booking as submitted by a client. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingProposal {
    pub staff_id: Option<StaffId>,
    pub service_id: Option<ServiceId>,
    #[serde(alias = "appointmentDate")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date", example = "2025-05-05"))]
    pub date: Option<DateKey>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "09:00"))]
    pub start_time: Option<TimeOfDay>,
    /// Only needed to create the booking, never validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
}

/// A proposal that passed every check, with its resolved interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ValidatedBooking {
    pub staff_id: StaffId,
    pub service_id: ServiceId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date", example = "2025-05-05"))]
    pub date: DateKey,
    pub interval: Interval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateClosedReason {
    ClosedWeekday,
    InPast,
    BeyondHorizon,
}

impl fmt::Display for DateClosedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DateClosedReason::ClosedWeekday => "the salon is closed on that day",
            DateClosedReason::InPast => "the date is in the past",
            DateClosedReason::BeyondHorizon => "the date is beyond the booking horizon",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationError {
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },
    #[error("Unknown service: {service_id}")]
    UnknownService { service_id: ServiceId },
    #[error("Date {date} is not bookable: {reason}")]
    DateClosed {
        date: DateKey,
        reason: DateClosedReason,
    },
    #[error("A {duration_minutes}-minute service at {start} is outside business hours")]
    OutOfHours {
        start: TimeOfDay,
        duration_minutes: u32,
    },
    #[error("Start time {start} is not on the {granularity_minutes}-minute grid")]
    OffGrid {
        start: TimeOfDay,
        granularity_minutes: u32,
    },
    #[error("The slot at {start} on {date} is already taken")]
    SlotConflict { date: DateKey, start: TimeOfDay },
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::SlotConflict { .. } => StatusCode::CONFLICT,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": {
                "message": self.to_string(),
                "code": status.as_u16(),
                "details": self,
            }
        });
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for SalonifyError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::SlotConflict { .. } => SalonifyError::ConflictError(err.to_string()),
            _ => SalonifyError::ValidationError(err.to_string()),
        }
    }
}

/// Validates booking proposals against a grid, a booking window and a snapshot of bookings.
#[derive(Debug, Clone)]
pub struct BookingValidator {
    grid: TimeGrid,
    horizon_days: u32,
    time_zone: Tz,
    fixed_today: Option<DateKey>,
}

impl BookingValidator {
    /// Uses UTC to determine "today".
    pub fn new(grid: TimeGrid, horizon_days: u32) -> Self {
        Self {
            grid,
            horizon_days,
            time_zone: Tz::UTC,
            fixed_today: None,
        }
    }

    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn from_config(config: &SchedulingConfig) -> Result<Self, SchedulingError> {
        let grid = TimeGrid::from_config(config)?;
        let validator = Self::new(grid, config.booking_horizon_days);
        match config.time_zone.as_deref() {
            Some(name) => {
                let tz: Tz = name
                    .parse()
                    .map_err(|_| SchedulingError::UnknownTimeZone(name.to_string()))?;
                Ok(validator.with_time_zone(tz))
            }
            None => Ok(validator),
        }
    }

    /// Pins "today" to a fixed date instead of reading the clock.
    pub fn with_fixed_today(mut self, today: DateKey) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// The current business date in the configured time zone.
    pub fn today(&self) -> DateKey {
        if let Some(today) = self.fixed_today {
            return today;
        }
        DateKey::from_naive(Utc::now().with_timezone(&self.time_zone).date_naive())
    }

    /// Past dates and dates after `today + horizon` are rejected.
    pub fn check_booking_window(&self, today: DateKey, date: DateKey) -> Result<(), ValidationError> {
        let days_ahead = date.days_since(today);
        if days_ahead < 0 {
            return Err(ValidationError::DateClosed {
                date,
                reason: DateClosedReason::InPast,
            });
        }
        if days_ahead > i64::from(self.horizon_days) {
            return Err(ValidationError::DateClosed {
                date,
                reason: DateClosedReason::BeyondHorizon,
            });
        }
        Ok(())
    }

    /// Closed weekdays plus the booking window.
    pub fn check_date(&self, today: DateKey, date: DateKey) -> Result<(), ValidationError> {
        if self.grid.is_closed(date) {
            return Err(ValidationError::DateClosed {
                date,
                reason: DateClosedReason::ClosedWeekday,
            });
        }
        self.check_booking_window(today, date)
    }

    /// Validates against the current business date.
    pub fn validate(
        &self,
        proposal: &BookingProposal,
        existing: &[AppointmentBooking],
        catalog: &ServiceCatalog,
    ) -> Result<ValidatedBooking, ValidationError> {
        self.validate_on(self.today(), proposal, existing, catalog)
    }

    /// Validates as if the business date were `today`.
    pub fn validate_on(
        &self,
        today: DateKey,
        proposal: &BookingProposal,
        existing: &[AppointmentBooking],
        catalog: &ServiceCatalog,
    ) -> Result<ValidatedBooking, ValidationError> {
        let staff_id = required(proposal.staff_id, "staffId")?;
        let service_id = required(proposal.service_id, "serviceId")?;
        let date = required(proposal.date, "date")?;
        let start = required(proposal.start_time, "startTime")?;

        let service = catalog
            .resolve(service_id)
            .ok_or(ValidationError::UnknownService { service_id })?;
        let duration_minutes = service.duration_minutes;

        self.check_date(today, date)?;

        let end = self
            .grid
            .candidate_end(start, duration_minutes)
            .ok_or(ValidationError::OutOfHours {
                start,
                duration_minutes,
            })?;

        if !self.grid.is_slot_start(start) {
            return Err(ValidationError::OffGrid {
                start,
                granularity_minutes: self.grid.granularity_minutes(),
            });
        }

        let slots = AvailabilityCalculator::new(&self.grid).calculate(
            staff_id,
            date,
            duration_minutes,
            existing,
        );
        if !slots.is_available(start) {
            debug!(
                "Rejecting proposal for staff {} at {} on {}: slot taken",
                staff_id, start, date
            );
            return Err(ValidationError::SlotConflict { date, start });
        }

        // candidate_end succeeded, so start < end
        let interval = Interval::new(start, end).map_err(|_| ValidationError::OutOfHours {
            start,
            duration_minutes,
        })?;

        Ok(ValidatedBooking {
            staff_id,
            service_id,
            date,
            interval,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField { field })
}
