// File: crates/salonify_scheduling/src/handlers.rs
use crate::availability::{AvailabilityCalculator, SlotGrid};
use crate::validator::{BookingProposal, BookingValidator, ValidatedBooking, ValidationError};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use salonify_common::models::{
    AppointmentBooking, BookingId, BookingRequest, CustomerId, DateKey, ServiceCatalog,
    ServiceCategory, ServiceId, ServiceSpec, StaffId,
};
use salonify_common::services::SharedBookingService;
use salonify_common::{log_error, map_json_error, SalonifyError};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

// Shared state needed by the scheduling handlers
#[derive(Clone)]
pub struct SchedulingState {
    pub validator: Arc<BookingValidator>,
    pub bookings: SharedBookingService,
}

impl SchedulingState {
    pub fn new(validator: BookingValidator, bookings: SharedBookingService) -> Self {
        Self {
            validator: Arc::new(validator),
            bookings,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    #[serde(alias = "staff_id")]
    pub staff_id: StaffId,
    /// Date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-05-05"))]
    pub date: String,
    /// Service whose duration is used
    #[serde(default, alias = "service_id")]
    pub service_id: Option<ServiceId>,
    /// Explicit duration, used when no service is given
    #[serde(default, alias = "duration_minutes")]
    pub duration_minutes: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct StaffBookingsQuery {
    /// Restrict to one date (YYYY-MM-DD)
    pub date: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ServicesQuery {
    /// Restrict to one category, e.g. NAIL_ART
    pub category: Option<ServiceCategory>,
}

fn parse_date(raw: &str) -> Result<DateKey, Response> {
    raw.parse::<DateKey>()
        .map_err(|e| SalonifyError::from(e).into_response())
}

async fn load_catalog(state: &SchedulingState) -> Result<ServiceCatalog, Response> {
    let services = state
        .bookings
        .fetch_services()
        .await
        .map_err(|e| SalonifyError::from(e).into_response())?;
    ServiceCatalog::new(services).map_err(|e| SalonifyError::from(e).into_response())
}

/// Runs the validator against the current bookings of the proposed staff day.
async fn validate_proposal(
    state: &SchedulingState,
    proposal: &BookingProposal,
) -> Result<ValidatedBooking, Response> {
    let catalog = load_catalog(state).await?;
    let existing = match (proposal.staff_id, proposal.date) {
        (Some(staff_id), Some(date)) => state
            .bookings
            .fetch_bookings(staff_id, date)
            .await
            .map_err(|e| SalonifyError::from(e).into_response())?,
        _ => Vec::new(),
    };

    state
        .validator
        .validate(proposal, &existing, &catalog)
        .map_err(|err| {
            info!("Booking proposal rejected: {}", err);
            err.into_response()
        })
}

/// Handler to get the slot grid of one staff member's day.
#[axum::debug_handler]
pub async fn get_availability_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<SlotGrid>, Response> {
    let date = parse_date(&query.date)?;

    let duration_minutes = match (query.service_id, query.duration_minutes) {
        (Some(service_id), _) => {
            let catalog = load_catalog(&state).await?;
            catalog
                .resolve(service_id)
                .map(|service| service.duration_minutes)
                .ok_or_else(|| ValidationError::UnknownService { service_id }.into_response())?
        }
        (None, Some(minutes)) if minutes > 0 => minutes,
        (None, Some(_)) => {
            return Err(SalonifyError::ValidationError(
                "durationMinutes must be positive".to_string(),
            )
            .into_response())
        }
        (None, None) => {
            return Err(ValidationError::MissingField { field: "serviceId" }.into_response())
        }
    };

    state
        .validator
        .check_booking_window(state.validator.today(), date)
        .map_err(IntoResponse::into_response)?;

    let bookings = state
        .bookings
        .fetch_bookings(query.staff_id, date)
        .await
        .map_err(|e| SalonifyError::from(e).into_response())?;

    let grid = AvailabilityCalculator::new(state.validator.grid()).calculate(
        query.staff_id,
        date,
        duration_minutes,
        &bookings,
    );
    Ok(Json(grid))
}

/// Handler to check a proposal without booking it.
#[axum::debug_handler]
pub async fn validate_booking_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(proposal): Json<BookingProposal>,
) -> Result<Json<ValidatedBooking>, Response> {
    validate_proposal(&state, &proposal).await.map(Json)
}

/// Handler to validate and create a booking.
///
/// The booking service re-checks the slot at write time; losing that race
/// answers 409 so the client can re-select.
#[axum::debug_handler]
pub async fn create_booking_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(proposal): Json<BookingProposal>,
) -> Result<(StatusCode, Json<AppointmentBooking>), Response> {
    let validated = validate_proposal(&state, &proposal).await?;
    let customer_id = proposal
        .customer_id
        .ok_or_else(|| ValidationError::MissingField { field: "customerId" }.into_response())?;

    let request = BookingRequest {
        customer_id,
        staff_id: validated.staff_id,
        service_id: validated.service_id,
        appointment_date: validated.date,
        start_time: validated.interval.start(),
    };

    match state.bookings.create_booking(request).await {
        Ok(booking) => {
            info!(
                "Booked {} for customer {} with staff {} on {}",
                validated.interval, customer_id, booking.staff_id, booking.date
            );
            Ok((StatusCode::CREATED, Json(booking)))
        }
        Err(e) => {
            log_error(&e, "Booking creation failed");
            Err(SalonifyError::from(e).into_response())
        }
    }
}

#[axum::debug_handler]
pub async fn get_booking_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<BookingId>,
) -> Result<Json<AppointmentBooking>, Response> {
    let result = state.bookings.fetch_booking(id).await;
    map_json_error(result, SalonifyError::from)
}

#[axum::debug_handler]
pub async fn cancel_booking_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<BookingId>,
) -> Result<Json<AppointmentBooking>, Response> {
    let result = state.bookings.cancel_booking(id).await;
    map_json_error(result, SalonifyError::from)
}

#[axum::debug_handler]
pub async fn complete_booking_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<BookingId>,
) -> Result<Json<AppointmentBooking>, Response> {
    let result = state.bookings.complete_booking(id).await;
    map_json_error(result, SalonifyError::from)
}

#[axum::debug_handler]
pub async fn staff_bookings_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(staff_id): Path<StaffId>,
    Query(query): Query<StaffBookingsQuery>,
) -> Result<Json<Vec<AppointmentBooking>>, Response> {
    let result = match query.date.as_deref() {
        Some(raw) => {
            let date = parse_date(raw)?;
            state.bookings.fetch_bookings(staff_id, date).await
        }
        None => state.bookings.fetch_staff_bookings(staff_id).await,
    };
    map_json_error(result, SalonifyError::from)
}

#[axum::debug_handler]
pub async fn customer_bookings_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(customer_id): Path<CustomerId>,
) -> Result<Json<Vec<AppointmentBooking>>, Response> {
    let result = state.bookings.fetch_customer_bookings(customer_id).await;
    map_json_error(result, SalonifyError::from)
}

#[axum::debug_handler]
pub async fn list_services_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<ServicesQuery>,
) -> Result<Json<Vec<ServiceSpec>>, Response> {
    let catalog = load_catalog(&state).await?;
    let services = catalog
        .iter()
        .filter(|service| query.category.map_or(true, |category| service.category == category))
        .cloned()
        .collect();
    Ok(Json(services))
}
