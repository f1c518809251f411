//! Service abstractions for external services.
//!
//! The scheduling core never talks to storage itself. Everything it reads
//! comes through the [`BookingService`] trait, implemented by the in-memory
//! system of record and by the HTTP client for the appointment API.

use crate::models::{
    AppointmentBooking, BookingId, BookingRequest, BookingStatus, CustomerId, DateKey, ServiceSpec,
    StaffId,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Errors reported by a booking service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingServiceError {
    /// Another booking was accepted first for an overlapping interval.
    #[error("Slot conflict: {0}")]
    Conflict(String),
    #[error("Booking not found: {0}")]
    NotFound(BookingId),
    #[error("Booking {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    },
    /// The system of record refused the request for a reason other than a conflict.
    #[error("Booking rejected: {0}")]
    Rejected(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A trait for booking service operations.
///
/// `fetch_bookings` returns bookings of every status; callers filter.
/// `create_booking` is authoritative: it re-checks overlaps at write time and
/// fails with [`BookingServiceError::Conflict`] when it loses a race.
pub trait BookingService: Send + Sync {
    /// Error type returned by booking service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// All bookings of a staff member on one date.
    fn fetch_bookings(
        &self,
        staff_id: StaffId,
        date: DateKey,
    ) -> BoxFuture<'_, Vec<AppointmentBooking>, Self::Error>;

    /// A single booking by id.
    fn fetch_booking(&self, id: BookingId) -> BoxFuture<'_, AppointmentBooking, Self::Error>;

    /// Every booking of a customer.
    fn fetch_customer_bookings(
        &self,
        customer_id: CustomerId,
    ) -> BoxFuture<'_, Vec<AppointmentBooking>, Self::Error>;

    /// Every booking of a staff member.
    fn fetch_staff_bookings(
        &self,
        staff_id: StaffId,
    ) -> BoxFuture<'_, Vec<AppointmentBooking>, Self::Error>;

    /// Create a booking.
    fn create_booking(
        &self,
        request: BookingRequest,
    ) -> BoxFuture<'_, AppointmentBooking, Self::Error>;

    /// Scheduled -> Cancelled.
    fn cancel_booking(&self, id: BookingId) -> BoxFuture<'_, AppointmentBooking, Self::Error>;

    /// Scheduled -> Completed.
    fn complete_booking(&self, id: BookingId) -> BoxFuture<'_, AppointmentBooking, Self::Error>;

    /// The service catalog.
    fn fetch_services(&self) -> BoxFuture<'_, Vec<ServiceSpec>, Self::Error>;
}

/// Shared handle to whichever booking service the application was configured with.
pub type SharedBookingService = Arc<dyn BookingService<Error = BookingServiceError>>;

/// A factory for creating service instances.
pub trait ServiceFactory: Send + Sync {
    /// Get the booking service instance.
    fn booking_service(&self) -> SharedBookingService;
}
