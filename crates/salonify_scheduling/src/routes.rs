// --- File: crates/salonify_scheduling/src/routes.rs ---

use crate::handlers::{
    cancel_booking_handler, complete_booking_handler, create_booking_handler,
    customer_bookings_handler, get_availability_handler, get_booking_handler,
    list_services_handler, staff_bookings_handler, validate_booking_handler, SchedulingState,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all scheduling routes, to be nested under `/api`.
pub fn routes(state: Arc<SchedulingState>) -> Router {
    Router::new()
        .route("/availability", get(get_availability_handler))
        .route("/bookings", post(create_booking_handler))
        .route("/bookings/validate", post(validate_booking_handler))
        .route("/bookings/{id}", get(get_booking_handler))
        .route("/bookings/{id}/cancel", put(cancel_booking_handler))
        .route("/bookings/{id}/complete", put(complete_booking_handler))
        .route("/staff/{staff_id}/bookings", get(staff_bookings_handler))
        .route(
            "/customers/{customer_id}/bookings",
            get(customer_bookings_handler),
        )
        .route("/services", get(list_services_handler))
        .with_state(state)
}
