// --- File: crates/services/salonify_backend/src/app_state.rs ---
use axum::Router;
use salonify_common::error::SalonifyError;
use salonify_common::services::ServiceFactory;
use salonify_config::AppConfig;
use salonify_scheduling::{BookingValidator, SchedulingState};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service_factory::SalonifyServiceFactory;

/// Application state that is shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service_factory: Arc<dyn ServiceFactory>,
    pub scheduling: Arc<SchedulingState>,
}

impl AppState {
    /// Wire the booking backend and the validator from configuration.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, SalonifyError> {
        let service_factory: Arc<dyn ServiceFactory> =
            Arc::new(SalonifyServiceFactory::new(config.clone())?);
        let validator = BookingValidator::from_config(&config.scheduling)?;
        Ok(Self::with_parts(config, service_factory, validator))
    }

    /// Assemble the state from already built parts, e.g. a validator pinned to a fixed day.
    pub fn with_parts(
        config: Arc<AppConfig>,
        service_factory: Arc<dyn ServiceFactory>,
        validator: BookingValidator,
    ) -> Self {
        let scheduling = Arc::new(SchedulingState::new(
            validator,
            service_factory.booking_service(),
        ));
        Self {
            config,
            service_factory,
            scheduling,
        }
    }

    /// The full application router with every API route nested under `/api`.
    pub fn router(&self) -> Router {
        let api = salonify_common::routes().merge(salonify_scheduling::routes(self.scheduling.clone()));

        #[allow(unused_mut)] // only mutated with the openapi feature
        let mut app = Router::new().nest("/api", api);

        #[cfg(feature = "openapi")]
        {
            app = app.merge(swagger_ui());
        }

        app.layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }
}

#[cfg(feature = "openapi")]
fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    use salonify_scheduling::doc::SchedulingApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Salonify API",
            version = "0.1.0",
            description = "Appointment availability and booking API",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        tags((name = "Salonify", description = "Core service endpoints")),
        servers((url = "/api", description = "Main API Prefix")),
    )]
    struct ApiDoc;

    let mut openapi_doc = ApiDoc::openapi();
    openapi_doc.merge(SchedulingApiDoc::openapi());
    tracing::info!("Adding Swagger UI at /api/docs");
    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use salonify_config::ServiceEntry;
    use tower::ServiceExt;

    fn config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            services: vec![ServiceEntry {
                id: 2,
                name: "Spa Pedicure".to_string(),
                description: String::new(),
                price: 4500,
                duration_minutes: 60,
                category: "PEDICURE".to_string(),
            }],
            ..AppConfig::default()
        })
    }

    #[tokio::test]
    async fn test_health_is_nested_under_api() {
        let app = AppState::new(config()).unwrap().router();

        let response = app
            .clone()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_services_come_from_config() {
        let app = AppState::new(config()).unwrap().router();

        let response = app
            .oneshot(Request::get("/api/services").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body[0]["name"], "Spa Pedicure");
        assert_eq!(body[0]["durationMinutes"], 60);
    }

    #[test]
    fn test_bad_business_hours_fail_startup() {
        let mut config = (*config()).clone();
        config.scheduling.business_start = "19:00".to_string();
        assert!(AppState::new(Arc::new(config)).is_err());
    }
}
