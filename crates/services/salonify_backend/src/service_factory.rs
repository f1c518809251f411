// --- File: crates/services/salonify_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Picks the booking system of record once at startup: the external
//! appointment API when it is switched on and configured, the embedded
//! in-memory store otherwise.
use salonify_common::error::SalonifyError;
use salonify_common::is_remote_api_enabled;
use salonify_common::services::{ServiceFactory, SharedBookingService};
use salonify_config::AppConfig;
use salonify_scheduling::{InMemoryBookingService, RemoteBookingService};
use std::sync::Arc;
use tracing::{info, warn};

/// Which backend the factory ended up wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingBackend {
    InMemory,
    RemoteApi,
}

pub struct SalonifyServiceFactory {
    config: Arc<AppConfig>,
    backend: BookingBackend,
    booking_service: SharedBookingService,
}

impl SalonifyServiceFactory {
    /// Create a new service factory.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, SalonifyError> {
        let (backend, booking_service): (BookingBackend, SharedBookingService) =
            match config.remote_api.as_ref() {
                Some(remote) if is_remote_api_enabled(&config) => {
                    info!("Using appointment API at {}", remote.base_url);
                    let service = RemoteBookingService::from_config(remote)?;
                    (BookingBackend::RemoteApi, Arc::new(service))
                }
                _ => {
                    if config.use_remote_api {
                        warn!("use_remote_api is set but [remote_api] is missing, using the in-memory store");
                    }
                    let service = InMemoryBookingService::from_config(&config)?;
                    (BookingBackend::InMemory, Arc::new(service))
                }
            };

        Ok(Self {
            config,
            backend,
            booking_service,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn backend(&self) -> BookingBackend {
        self.backend
    }
}

impl ServiceFactory for SalonifyServiceFactory {
    fn booking_service(&self) -> SharedBookingService {
        Arc::clone(&self.booking_service)
    }
}
