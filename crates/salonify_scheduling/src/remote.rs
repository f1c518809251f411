// --- File: crates/salonify_scheduling/src/remote.rs ---
//! Client for the external appointment REST API.
//!
//! When `use_remote_api` is set, the appointment API is the system of record
//! and this client implements [`BookingService`] on top of it. The API is
//! authoritative for writes: a `409 Conflict` from `POST /appointments` means
//! another booking won the slot and is reported as
//! [`BookingServiceError::Conflict`].
//!
//! Appointments come back with nested customer, staff and service objects;
//! they are flattened into [`AppointmentBooking`] records here.

use crate::error::SchedulingError;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use salonify_common::create_client;
use salonify_common::http::client::DEFAULT_TIMEOUT_SECS;
use salonify_common::models::{
    AppointmentBooking, BookingId, BookingRequest, BookingStatus, CustomerId, DateKey,
    ServiceCategory, ServiceId, ServiceSpec, StaffId, TimeOfDay,
};
use salonify_common::services::{BookingService, BookingServiceError, BoxFuture};
use salonify_config::RemoteApiConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// Any object carrying an `id`; the remaining fields are not needed here.
#[derive(Debug, Deserialize)]
struct ApiRef {
    id: i64,
}

/// Appointment as returned by the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAppointment {
    id: BookingId,
    customer: ApiRef,
    staff: ApiRef,
    service: ApiRef,
    appointment_date: DateKey,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    status: BookingStatus,
}

impl From<ApiAppointment> for AppointmentBooking {
    fn from(api: ApiAppointment) -> Self {
        AppointmentBooking {
            id: api.id,
            staff_id: api.staff.id,
            customer_id: api.customer.id,
            service_id: api.service.id,
            date: api.appointment_date,
            start_time: api.start_time,
            end_time: api.end_time,
            status: api.status,
        }
    }
}

/// Service as returned by the API. Prices are decimal currency units.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiService {
    id: ServiceId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: f64,
    duration_minutes: u32,
    category: ServiceCategory,
}

impl TryFrom<ApiService> for ServiceSpec {
    type Error = BookingServiceError;

    fn try_from(api: ApiService) -> Result<Self, Self::Error> {
        if api.duration_minutes == 0 {
            return Err(BookingServiceError::InvalidResponse(format!(
                "service {} has no duration",
                api.id
            )));
        }
        Ok(ServiceSpec {
            id: api.id,
            name: api.name,
            description: api.description.unwrap_or_default(),
            price: (api.price * 100.0).round() as i64,
            duration_minutes: api.duration_minutes,
            category: api.category,
        })
    }
}

/// Error body of the API, e.g. `{"error": "Conflict", "message": "Slot taken"}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// [`BookingService`] backed by the appointment REST API.
pub struct RemoteBookingService {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl RemoteBookingService {
    /// Creates a client for the API at `base_url`, e.g. `http://localhost:8080/api`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the API; a trailing slash is ignored
    /// * `api_token` - Sent as a bearer token on every request when present
    /// * `timeout_secs` - Request timeout, defaults to 30 seconds
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, SchedulingError> {
        let client = create_client(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS), true)
            .map_err(|e| SchedulingError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
        })
    }

    pub fn from_config(config: &RemoteApiConfig) -> Result<Self, SchedulingError> {
        Self::new(
            config.base_url.clone(),
            config.api_token.clone(),
            config.timeout_secs,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and maps non-success statuses to service errors.
    ///
    /// `resource` is the booking a 404 refers to, if any.
    async fn send(
        &self,
        builder: RequestBuilder,
        resource: Option<BookingId>,
    ) -> Result<Response, BookingServiceError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BookingServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response).await;
        warn!("Appointment API returned {}: {}", status, message);
        Err(match (status, resource) {
            (StatusCode::CONFLICT, _) => BookingServiceError::Conflict(message),
            (StatusCode::NOT_FOUND, Some(id)) => BookingServiceError::NotFound(id),
            (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
                BookingServiceError::Rejected(message)
            }
            _ => BookingServiceError::Transport(format!("{status}: {message}")),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: Option<BookingId>,
    ) -> Result<T, BookingServiceError> {
        debug!("GET {}", self.url(path));
        let response = self.send(self.request(Method::GET, path), resource).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BookingServiceError::InvalidResponse(e.to_string()))
    }

    async fn get_appointments(&self, path: &str) -> Result<Vec<AppointmentBooking>, BookingServiceError> {
        let appointments: Vec<ApiAppointment> = self.get_json(path, None).await?;
        Ok(appointments.into_iter().map(AppointmentBooking::from).collect())
    }

    async fn get_appointment(&self, id: BookingId) -> Result<AppointmentBooking, BookingServiceError> {
        let appointment: ApiAppointment = self
            .get_json(&format!("appointments/{id}"), Some(id))
            .await?;
        Ok(appointment.into())
    }

    async fn post_appointment(&self, request: &BookingRequest) -> Result<AppointmentBooking, BookingServiceError> {
        let builder = self.request(Method::POST, "appointments").json(request);
        let response = self.send(builder, None).await?;
        let appointment: ApiAppointment = response
            .json()
            .await
            .map_err(|e| BookingServiceError::InvalidResponse(e.to_string()))?;
        Ok(appointment.into())
    }

    /// `PUT /appointments/{id}/{action}`. Cancel answers without a body, so
    /// the current state is re-read in that case.
    async fn put_transition(&self, id: BookingId, action: &str) -> Result<AppointmentBooking, BookingServiceError> {
        let builder = self.request(Method::PUT, &format!("appointments/{id}/{action}"));
        let response = self.send(builder, Some(id)).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| BookingServiceError::Transport(e.to_string()))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return self.get_appointment(id).await;
        }
        let appointment: ApiAppointment = serde_json::from_slice(&body)
            .map_err(|e| BookingServiceError::InvalidResponse(e.to_string()))?;
        Ok(appointment.into())
    }

    async fn get_services(&self) -> Result<Vec<ServiceSpec>, BookingServiceError> {
        let services: Vec<ApiService> = self.get_json("services", None).await?;
        services.into_iter().map(ServiceSpec::try_from).collect()
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(ApiErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ApiErrorBody {
            error: Some(error), ..
        }) => error,
        _ if !text.trim().is_empty() => text,
        _ => status.to_string(),
    }
}

impl BookingService for RemoteBookingService {
    type Error = BookingServiceError;

    fn fetch_bookings(
        &self,
        staff_id: StaffId,
        date: DateKey,
    ) -> BoxFuture<'_, Vec<AppointmentBooking>, Self::Error> {
        Box::pin(async move {
            self.get_appointments(&format!("appointments/staff/{staff_id}/date/{date}"))
                .await
        })
    }

    fn fetch_booking(&self, id: BookingId) -> BoxFuture<'_, AppointmentBooking, Self::Error> {
        Box::pin(self.get_appointment(id))
    }

    fn fetch_customer_bookings(
        &self,
        customer_id: CustomerId,
    ) -> BoxFuture<'_, Vec<AppointmentBooking>, Self::Error> {
        Box::pin(async move {
            self.get_appointments(&format!("appointments/customer/{customer_id}"))
                .await
        })
    }

    fn fetch_staff_bookings(
        &self,
        staff_id: StaffId,
    ) -> BoxFuture<'_, Vec<AppointmentBooking>, Self::Error> {
        Box::pin(async move {
            self.get_appointments(&format!("appointments/staff/{staff_id}"))
                .await
        })
    }

    fn create_booking(
        &self,
        request: BookingRequest,
    ) -> BoxFuture<'_, AppointmentBooking, Self::Error> {
        Box::pin(async move { self.post_appointment(&request).await })
    }

    fn cancel_booking(&self, id: BookingId) -> BoxFuture<'_, AppointmentBooking, Self::Error> {
        Box::pin(self.put_transition(id, "cancel"))
    }

    fn complete_booking(&self, id: BookingId) -> BoxFuture<'_, AppointmentBooking, Self::Error> {
        Box::pin(self.put_transition(id, "complete"))
    }

    fn fetch_services(&self) -> BoxFuture<'_, Vec<ServiceSpec>, Self::Error> {
        Box::pin(self.get_services())
    }
}
