// --- File: crates/salonify_scheduling/src/lib.rs ---
// Declare modules within this crate
pub mod availability;
pub mod doc;
pub mod error;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
#[cfg(test)]
mod logic_proptest;
pub mod overlap;
pub mod remote;
pub mod routes;
pub mod service;
#[cfg(test)]
mod service_test;
pub mod time_grid;
pub mod validator;

pub use availability::{AvailabilityCalculator, BlockReason, SlotAvailability, SlotGrid};
pub use error::SchedulingError;
pub use handlers::SchedulingState;
pub use overlap::overlaps;
pub use remote::RemoteBookingService;
pub use routes::routes;
pub use service::InMemoryBookingService;
pub use time_grid::TimeGrid;
pub use validator::{
    BookingProposal, BookingValidator, DateClosedReason, ValidatedBooking, ValidationError,
};
