// File: crates/salonify_scheduling/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::availability::{BlockReason, SlotAvailability, SlotGrid};
use crate::handlers::{AvailabilityQuery, ServicesQuery};
use crate::validator::{BookingProposal, ValidatedBooking};
use salonify_common::models::{
    AppointmentBooking, BookingRequest, BookingStatus, Interval, ServiceCategory, ServiceSpec,
};

#[utoipa::path(
    get,
    path = "/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Slot grid of one staff day", body = SlotGrid),
        (status = 400, description = "Malformed date"),
        (status = 422, description = "Unknown service or date outside the booking window")
    ),
    tag = "Scheduling"
)]
fn doc_get_availability() {}

#[utoipa::path(
    post,
    path = "/bookings/validate",
    request_body(content = BookingProposal, example = json!({
        "staffId": 2,
        "serviceId": 1,
        "date": "2025-05-05",
        "startTime": "09:00"
    })),
    responses(
        (status = 200, description = "Proposal is bookable", body = ValidatedBooking),
        (status = 409, description = "Slot already taken",
         example = json!({
             "error": {
                 "message": "The slot at 09:00 on 2025-05-05 is already taken",
                 "code": 409,
                 "details": {"kind": "SLOT_CONFLICT", "date": "2025-05-05", "start": "09:00"}
             }
         })
        ),
        (status = 422, description = "Missing field, unknown service, closed date, out of hours or off grid")
    ),
    tag = "Scheduling"
)]
fn doc_validate_booking() {}

#[utoipa::path(
    post,
    path = "/bookings",
    request_body(content = BookingProposal, example = json!({
        "customerId": 7,
        "staffId": 2,
        "serviceId": 1,
        "date": "2025-05-05",
        "startTime": "09:00"
    })),
    responses(
        (status = 201, description = "Booking created", body = AppointmentBooking),
        (status = 409, description = "Slot already taken, please re-select"),
        (status = 422, description = "Proposal rejected"),
        (status = 502, description = "Appointment API unavailable")
    ),
    tag = "Scheduling"
)]
fn doc_create_booking() {}

#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking", body = AppointmentBooking),
        (status = 404, description = "No such booking")
    ),
    tag = "Scheduling"
)]
fn doc_get_booking() {}

#[utoipa::path(
    put,
    path = "/bookings/{id}/cancel",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Cancelled booking", body = AppointmentBooking),
        (status = 404, description = "No such booking"),
        (status = 409, description = "Booking is not scheduled")
    ),
    tag = "Scheduling"
)]
fn doc_cancel_booking() {}

#[utoipa::path(
    put,
    path = "/bookings/{id}/complete",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Completed booking", body = AppointmentBooking),
        (status = 404, description = "No such booking"),
        (status = 409, description = "Booking is not scheduled")
    ),
    tag = "Scheduling"
)]
fn doc_complete_booking() {}

#[utoipa::path(
    get,
    path = "/staff/{staff_id}/bookings",
    params(
        ("staff_id" = i64, Path, description = "Staff member id"),
        ("date" = Option<String>, Query, description = "Restrict to one date (YYYY-MM-DD)", format = "date")
    ),
    responses((status = 200, description = "Bookings of the staff member", body = [AppointmentBooking])),
    tag = "Scheduling"
)]
fn doc_staff_bookings() {}

#[utoipa::path(
    get,
    path = "/customers/{customer_id}/bookings",
    params(("customer_id" = i64, Path, description = "Customer id")),
    responses((status = 200, description = "Bookings of the customer", body = [AppointmentBooking])),
    tag = "Scheduling"
)]
fn doc_customer_bookings() {}

#[utoipa::path(
    get,
    path = "/services",
    params(ServicesQuery),
    responses((status = 200, description = "Service catalog", body = [ServiceSpec])),
    tag = "Scheduling"
)]
fn doc_list_services() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_availability,
        doc_validate_booking,
        doc_create_booking,
        doc_get_booking,
        doc_cancel_booking,
        doc_complete_booking,
        doc_staff_bookings,
        doc_customer_bookings,
        doc_list_services
    ),
    components(schemas(
        SlotGrid,
        SlotAvailability,
        BlockReason,
        BookingProposal,
        ValidatedBooking,
        Interval,
        AppointmentBooking,
        BookingRequest,
        BookingStatus,
        ServiceSpec,
        ServiceCategory
    )),
    tags(
        (name = "Scheduling", description = "Availability and booking API")
    )
)]
pub struct SchedulingApiDoc;
