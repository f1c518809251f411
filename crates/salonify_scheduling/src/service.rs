// --- File: crates/salonify_scheduling/src/service.rs ---
//! In-memory booking service.
//!
//! Serves as the system of record when no remote appointment API is
//! configured. All writes happen under one lock and re-run the validator
//! there, so two racing requests for the same slot cannot both succeed.

use crate::error::SchedulingError;
use crate::validator::{BookingProposal, BookingValidator, ValidationError};
use salonify_common::models::{
    AppointmentBooking, BookingId, BookingRequest, BookingStatus, CustomerId, DateKey,
    ServiceCatalog, ServiceSpec, StaffId,
};
use salonify_common::services::{BookingService, BookingServiceError, BoxFuture};
use salonify_config::AppConfig;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

#[derive(Debug)]
struct BookingStore {
    bookings: BTreeMap<BookingId, AppointmentBooking>,
    next_id: BookingId,
}

pub struct InMemoryBookingService {
    validator: BookingValidator,
    catalog: ServiceCatalog,
    store: Mutex<BookingStore>,
}

impl InMemoryBookingService {
    pub fn new(validator: BookingValidator, catalog: ServiceCatalog) -> Self {
        Self {
            validator,
            catalog,
            store: Mutex::new(BookingStore {
                bookings: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, SchedulingError> {
        let validator = BookingValidator::from_config(&config.scheduling)?;
        let catalog = ServiceCatalog::from_entries(&config.services)?;
        info!(
            "In-memory booking service ready with {} services",
            catalog.len()
        );
        Ok(Self::new(validator, catalog))
    }

    /// Seeds existing bookings as-is, without validation.
    ///
    /// Malformed records are accepted here; availability treats them
    /// conservatively.
    pub fn with_bookings(self, bookings: impl IntoIterator<Item = AppointmentBooking>) -> Self {
        if let Ok(mut store) = self.store.lock() {
            for booking in bookings {
                store.next_id = store.next_id.max(booking.id.saturating_add(1));
                store.bookings.insert(booking.id, booking);
            }
        }
        self
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    fn lock(&self) -> Result<MutexGuard<'_, BookingStore>, BookingServiceError> {
        self.store
            .lock()
            .map_err(|_| BookingServiceError::Transport("booking store lock poisoned".to_string()))
    }

    fn collect<F>(&self, filter: F) -> Result<Vec<AppointmentBooking>, BookingServiceError>
    where
        F: Fn(&AppointmentBooking) -> bool,
    {
        let store = self.lock()?;
        Ok(store.bookings.values().filter(|b| filter(b)).cloned().collect())
    }

    fn insert_validated(&self, request: BookingRequest) -> Result<AppointmentBooking, BookingServiceError> {
        let proposal = BookingProposal {
            staff_id: Some(request.staff_id),
            service_id: Some(request.service_id),
            date: Some(request.appointment_date),
            start_time: Some(request.start_time),
            customer_id: Some(request.customer_id),
        };
        let today = self.validator.today();

        let mut store = self.lock()?;
        let existing: Vec<AppointmentBooking> = store
            .bookings
            .values()
            .filter(|b| b.staff_id == request.staff_id && b.date == request.appointment_date)
            .cloned()
            .collect();

        let validated = self
            .validator
            .validate_on(today, &proposal, &existing, &self.catalog)
            .map_err(|err| match err {
                ValidationError::SlotConflict { .. } => BookingServiceError::Conflict(err.to_string()),
                other => BookingServiceError::Rejected(other.to_string()),
            })?;

        let id = store.next_id;
        if store.bookings.contains_key(&id) {
            return Err(BookingServiceError::Rejected(
                "booking ids exhausted".to_string(),
            ));
        }
        store.next_id = id.saturating_add(1);
        let booking = AppointmentBooking {
            id,
            staff_id: validated.staff_id,
            customer_id: request.customer_id,
            service_id: validated.service_id,
            date: validated.date,
            start_time: validated.interval.start(),
            end_time: validated.interval.end(),
            status: BookingStatus::Scheduled,
        };
        store.bookings.insert(id, booking.clone());

        info!(
            "Booking {} created: staff {} on {} at {}",
            id, booking.staff_id, booking.date, validated.interval
        );
        Ok(booking)
    }

    /// Only scheduled bookings can move, and only once.
    fn transition(&self, id: BookingId, to: BookingStatus) -> Result<AppointmentBooking, BookingServiceError> {
        let mut store = self.lock()?;
        let booking = store
            .bookings
            .get_mut(&id)
            .ok_or(BookingServiceError::NotFound(id))?;

        if booking.status != BookingStatus::Scheduled {
            return Err(BookingServiceError::InvalidTransition {
                id,
                from: booking.status,
                to,
            });
        }
        booking.status = to;
        info!("Booking {} is now {}", id, to);
        Ok(booking.clone())
    }
}

impl BookingService for InMemoryBookingService {
    type Error = BookingServiceError;

    fn fetch_bookings(
        &self,
        staff_id: StaffId,
        date: DateKey,
    ) -> BoxFuture<'_, Vec<AppointmentBooking>, Self::Error> {
        Box::pin(async move {
            let bookings = self.collect(|b| b.staff_id == staff_id && b.date == date)?;
            debug!(
                "Fetched {} bookings for staff {} on {}",
                bookings.len(),
                staff_id,
                date
            );
            Ok(bookings)
        })
    }

    fn fetch_booking(&self, id: BookingId) -> BoxFuture<'_, AppointmentBooking, Self::Error> {
        Box::pin(async move {
            let store = self.lock()?;
            store
                .bookings
                .get(&id)
                .cloned()
                .ok_or(BookingServiceError::NotFound(id))
        })
    }

    fn fetch_customer_bookings(
        &self,
        customer_id: CustomerId,
    ) -> BoxFuture<'_, Vec<AppointmentBooking>, Self::Error> {
        Box::pin(async move { self.collect(|b| b.customer_id == customer_id) })
    }

    fn fetch_staff_bookings(
        &self,
        staff_id: StaffId,
    ) -> BoxFuture<'_, Vec<AppointmentBooking>, Self::Error> {
        Box::pin(async move { self.collect(|b| b.staff_id == staff_id) })
    }

    fn create_booking(
        &self,
        request: BookingRequest,
    ) -> BoxFuture<'_, AppointmentBooking, Self::Error> {
        Box::pin(async move { self.insert_validated(request) })
    }

    fn cancel_booking(&self, id: BookingId) -> BoxFuture<'_, AppointmentBooking, Self::Error> {
        Box::pin(async move { self.transition(id, BookingStatus::Cancelled) })
    }

    fn complete_booking(&self, id: BookingId) -> BoxFuture<'_, AppointmentBooking, Self::Error> {
        Box::pin(async move { self.transition(id, BookingStatus::Completed) })
    }

    fn fetch_services(&self) -> BoxFuture<'_, Vec<ServiceSpec>, Self::Error> {
        Box::pin(async move { Ok(self.catalog.iter().cloned().collect()) })
    }
}
