#[cfg(test)]
mod tests {
    use crate::service::InMemoryBookingService;
    use crate::time_grid::TimeGrid;
    use crate::validator::BookingValidator;
    use salonify_common::models::{
        AppointmentBooking, BookingRequest, BookingStatus, DateKey, ServiceCatalog,
        ServiceCategory, ServiceSpec, TimeOfDay,
    };
    use salonify_common::services::{BookingService, BookingServiceError};
    use salonify_config::{AppConfig, ServiceEntry};
    use std::sync::Arc;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    // Monday
    fn today() -> DateKey {
        DateKey::new(2025, 5, 5).unwrap()
    }

    fn service() -> InMemoryBookingService {
        let catalog = ServiceCatalog::new(vec![
            ServiceSpec {
                id: 1,
                name: "Classic Manicure".to_string(),
                description: String::new(),
                price: 2500,
                duration_minutes: 30,
                category: ServiceCategory::Manicure,
            },
            ServiceSpec {
                id: 2,
                name: "Spa Pedicure".to_string(),
                description: String::new(),
                price: 4500,
                duration_minutes: 60,
                category: ServiceCategory::Pedicure,
            },
        ])
        .unwrap();
        let validator = BookingValidator::new(TimeGrid::default(), 30).with_fixed_today(today());
        InMemoryBookingService::new(validator, catalog)
    }

    fn request(customer_id: i64, service_id: i64, start: &str) -> BookingRequest {
        BookingRequest {
            customer_id,
            staff_id: 2,
            service_id,
            appointment_date: today(),
            start_time: t(start),
        }
    }

    #[tokio::test]
    async fn test_create_booking_assigns_id_and_end_time() {
        let service = service();

        let first = service.create_booking(request(7, 2, "10:00")).await.unwrap();
        let second = service.create_booking(request(8, 1, "11:00")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.end_time, t("11:00"));
        assert_eq!(first.status, BookingStatus::Scheduled);
        assert_eq!(service.fetch_booking(1).await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_overlapping_create_is_a_conflict() {
        let service = service();
        service.create_booking(request(7, 2, "10:00")).await.unwrap();

        let err = service.create_booking(request(8, 1, "10:30")).await.unwrap_err();
        assert!(matches!(err, BookingServiceError::Conflict(_)));

        // touching is fine
        assert!(service.create_booking(request(8, 1, "11:00")).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected() {
        let service = service();

        let err = service.create_booking(request(7, 99, "10:00")).await.unwrap_err();
        assert!(matches!(err, BookingServiceError::Rejected(_)));

        let err = service.create_booking(request(7, 2, "17:30")).await.unwrap_err();
        assert!(matches!(err, BookingServiceError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_concurrent_creates_for_same_slot() {
        let service = Arc::new(service());

        let handles: Vec<_> = (0..2)
            .map(|customer| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .create_booking(request(customer, 2, "14:00"))
                        .await
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(BookingServiceError::Conflict(_))))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(conflicts, 1);
        assert_eq!(service.fetch_bookings(2, today()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_frees_the_slot() {
        let service = service();
        let booking = service.create_booking(request(7, 2, "10:00")).await.unwrap();

        let cancelled = service.cancel_booking(booking.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        assert!(service.create_booking(request(8, 2, "10:00")).await.is_ok());
    }

    #[tokio::test]
    async fn test_transitions_only_from_scheduled() {
        let service = service();
        let booking = service.create_booking(request(7, 1, "09:00")).await.unwrap();

        let completed = service.complete_booking(booking.id).await.unwrap();
        assert_eq!(completed.status, BookingStatus::Completed);

        let err = service.cancel_booking(booking.id).await.unwrap_err();
        assert_eq!(
            err,
            BookingServiceError::InvalidTransition {
                id: booking.id,
                from: BookingStatus::Completed,
                to: BookingStatus::Cancelled,
            }
        );

        assert_eq!(
            service.complete_booking(42).await.unwrap_err(),
            BookingServiceError::NotFound(42)
        );
    }

    #[tokio::test]
    async fn test_listing_by_staff_and_customer() {
        let service = service();
        service.create_booking(request(7, 1, "09:00")).await.unwrap();
        service.create_booking(request(7, 1, "09:30")).await.unwrap();
        service.create_booking(request(8, 1, "10:00")).await.unwrap();

        assert_eq!(service.fetch_customer_bookings(7).await.unwrap().len(), 2);
        assert_eq!(service.fetch_staff_bookings(2).await.unwrap().len(), 3);
        assert!(service.fetch_staff_bookings(3).await.unwrap().is_empty());
        assert!(service
            .fetch_bookings(2, DateKey::new(2025, 5, 6).unwrap())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_seeded_malformed_booking_blocks_slots() {
        let seeded = AppointmentBooking {
            id: 10,
            staff_id: 2,
            customer_id: 5,
            service_id: 1,
            date: today(),
            start_time: t("15:00"),
            end_time: t("15:00"),
            status: BookingStatus::Scheduled,
        };
        let service = service().with_bookings([seeded]);

        let err = service.create_booking(request(7, 1, "15:00")).await.unwrap_err();
        assert!(matches!(err, BookingServiceError::Conflict(_)));

        let next = service.create_booking(request(7, 1, "15:30")).await.unwrap();
        assert_eq!(next.id, 11);
    }

    #[tokio::test]
    async fn test_seeding_the_largest_id_does_not_overflow() {
        let seeded = AppointmentBooking {
            id: i64::MAX,
            staff_id: 2,
            customer_id: 5,
            service_id: 1,
            date: today(),
            start_time: t("09:00"),
            end_time: t("09:30"),
            status: BookingStatus::Scheduled,
        };
        let service = service().with_bookings([seeded.clone()]);

        let err = service.create_booking(request(7, 1, "10:00")).await.unwrap_err();
        assert!(matches!(err, BookingServiceError::Rejected(_)));
        assert_eq!(service.fetch_booking(i64::MAX).await.unwrap(), seeded);
    }

    #[tokio::test]
    async fn test_from_config_uses_service_catalog() {
        let config = AppConfig {
            services: vec![ServiceEntry {
                id: 3,
                name: "Nail Art".to_string(),
                description: "Hand painted".to_string(),
                price: 1500,
                duration_minutes: 45,
                category: "NAIL_ART".to_string(),
            }],
            ..AppConfig::default()
        };
        let service = InMemoryBookingService::from_config(&config).unwrap();

        let services = service.fetch_services().await.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].category, ServiceCategory::NailArt);
        assert_eq!(service.catalog().resolve(3).unwrap().duration_minutes, 45);
    }
}
