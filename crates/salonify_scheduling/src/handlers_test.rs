#[cfg(test)]
mod tests {
    use crate::handlers::{
        cancel_booking_handler, create_booking_handler, get_availability_handler,
        get_booking_handler, list_services_handler, staff_bookings_handler,
        validate_booking_handler, AvailabilityQuery, SchedulingState, ServicesQuery,
        StaffBookingsQuery,
    };
    use crate::availability::BlockReason;
    use crate::service::InMemoryBookingService;
    use crate::time_grid::TimeGrid;
    use crate::validator::{BookingProposal, BookingValidator};
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::Json;
    use salonify_common::models::{
        BookingStatus, DateKey, ServiceCatalog, ServiceCategory, ServiceSpec, TimeOfDay,
    };
    use std::sync::Arc;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    // Monday
    fn today() -> DateKey {
        DateKey::new(2025, 5, 5).unwrap()
    }

    fn state() -> Arc<SchedulingState> {
        let validator = BookingValidator::new(TimeGrid::default(), 30).with_fixed_today(today());
        let catalog = ServiceCatalog::new(vec![ServiceSpec {
            id: 1,
            name: "Spa Pedicure".to_string(),
            description: String::new(),
            price: 4500,
            duration_minutes: 60,
            category: ServiceCategory::Pedicure,
        }])
        .unwrap();
        let bookings = Arc::new(InMemoryBookingService::new(validator.clone(), catalog));
        Arc::new(SchedulingState::new(validator, bookings))
    }

    fn proposal(start: &str) -> BookingProposal {
        BookingProposal {
            staff_id: Some(2),
            service_id: Some(1),
            date: Some(today()),
            start_time: Some(t(start)),
            customer_id: Some(7),
        }
    }

    fn availability_query(service_id: Option<i64>, duration: Option<u32>) -> AvailabilityQuery {
        AvailabilityQuery {
            staff_id: 2,
            date: "2025-05-05".to_string(),
            service_id,
            duration_minutes: duration,
        }
    }

    #[tokio::test]
    async fn test_get_availability_handler() {
        let state = state();
        let Json(grid) = get_availability_handler(State(state), Query(availability_query(Some(1), None)))
            .await
            .unwrap();

        assert_eq!(grid.duration_minutes, 60);
        assert_eq!(grid.len(), 18);
        assert!(grid.is_available(t("17:00")));
        assert!(!grid.is_available(t("17:30")));
    }

    #[tokio::test]
    async fn test_get_availability_handler_errors() {
        let state = state();

        let err = get_availability_handler(State(state.clone()), Query(availability_query(None, None)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = get_availability_handler(State(state.clone()), Query(availability_query(Some(9), None)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let mut bad_date = availability_query(None, Some(30));
        bad_date.date = "05/05/2025".to_string();
        let err = get_availability_handler(State(state.clone()), Query(bad_date))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let mut past = availability_query(None, Some(30));
        past.date = "2025-05-02".to_string();
        let err = get_availability_handler(State(state), Query(past))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_huge_duration_is_answered_not_fatal() {
        let state = state();
        let Json(grid) =
            get_availability_handler(State(state), Query(availability_query(None, Some(u32::MAX))))
                .await
                .unwrap();

        assert_eq!(grid.len(), 18);
        assert_eq!(grid.available_starts().count(), 0);
        assert!(grid
            .slots
            .iter()
            .all(|slot| slot.reason == Some(BlockReason::ExceedsBusinessHours)));
    }

    #[tokio::test]
    async fn test_validate_and_book_slot_handlers() {
        let state = state();

        let Json(validated) = validate_booking_handler(State(state.clone()), Json(proposal("10:00")))
            .await
            .unwrap();
        assert_eq!(validated.interval.end(), t("11:00"));

        let (status, Json(booking)) = create_booking_handler(State(state.clone()), Json(proposal("10:00")))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(booking.status, BookingStatus::Scheduled);

        let err = validate_booking_handler(State(state.clone()), Json(proposal("10:30")))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let Json(fetched) = get_booking_handler(State(state), Path(booking.id))
            .await
            .unwrap();
        assert_eq!(fetched, booking);
    }

    #[tokio::test]
    async fn test_create_booking_requires_customer() {
        let state = state();
        let mut anonymous = proposal("10:00");
        anonymous.customer_id = None;

        let err = create_booking_handler(State(state), Json(anonymous))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_cancel_and_list_handlers() {
        let state = state();
        let (_, Json(booking)) = create_booking_handler(State(state.clone()), Json(proposal("09:00")))
            .await
            .unwrap();

        let Json(cancelled) = cancel_booking_handler(State(state.clone()), Path(booking.id))
            .await
            .unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let err = cancel_booking_handler(State(state.clone()), Path(booking.id))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let Json(listed) = staff_bookings_handler(
            State(state.clone()),
            Path(2),
            Query(StaffBookingsQuery {
                date: Some("2025-05-05".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(listed.len(), 1);

        let Json(services) = list_services_handler(State(state.clone()), Query(ServicesQuery::default()))
            .await
            .unwrap();
        assert_eq!(services.len(), 1);

        let Json(services) = list_services_handler(
            State(state.clone()),
            Query(ServicesQuery {
                category: Some(ServiceCategory::Gel),
            }),
        )
        .await
        .unwrap();
        assert!(services.is_empty());

        let err = get_booking_handler(State(state), Path(404)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
