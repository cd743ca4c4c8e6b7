use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::BookingError;
use crate::stores::booking_store::NewBooking;
use crate::stores::{AmenityStore, BookingStore, UserStore};
use crate::types::dto::booking::{AmenityDto, BookingRequest, UserBookingDto};
use crate::types::internal::context::RequestContext;

/// Amenity catalogue and booking workflows
pub struct BookingCoordinator {
    booking_store: Arc<BookingStore>,
    amenity_store: Arc<AmenityStore>,
    user_store: Arc<UserStore>,
}

impl BookingCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            booking_store: app_data.booking_store.clone(),
            amenity_store: app_data.amenity_store.clone(),
            user_store: app_data.user_store.clone(),
        }
    }

    /// Validate and store a booking request
    ///
    /// The window must be non-empty, the owner must be an authorised user and
    /// the amenity must exist. Nothing is written when a check fails.
    pub async fn save_booking(&self, ctx: &RequestContext, request: BookingRequest) -> Result<i32, InternalError> {
        let start_time = request.start_time.timestamp();
        let end_time = request.end_time.timestamp();

        if end_time <= start_time {
            return Err(BookingError::InvalidTimeWindow { start_time, end_time }.into());
        }

        if !self.user_store.authorised_user_exists(request.user_id).await? {
            return Err(BookingError::UserNotFound { user_id: request.user_id }.into());
        }

        if !self.amenity_store.amenity_exists(request.amenity_id).await? {
            return Err(BookingError::AmenityNotFound { amenity_id: request.amenity_id }.into());
        }

        let saved = self
            .booking_store
            .add_booking(NewBooking {
                user_id: request.user_id,
                amenity_id: request.amenity_id,
                start_time,
                end_time,
                purpose: request.purpose,
            })
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            ip = ?ctx.ip_address,
            source = ?ctx.source,
            booking_id = saved.id,
            user_id = saved.user_id,
            amenity_id = saved.amenity_id,
            "Booking requested"
        );
        Ok(saved.id)
    }

    pub async fn get_users_bookings(&self, user_id: i32) -> Result<Vec<UserBookingDto>, InternalError> {
        let rows = self.booking_store.get_bookings_for_user(user_id).await?;
        Ok(rows.into_iter().map(UserBookingDto::from).collect())
    }

    pub async fn list_amenities(&self) -> Result<Vec<AmenityDto>, InternalError> {
        let amenities = self.amenity_store.list_amenities().await?;
        Ok(amenities.into_iter().map(AmenityDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{create_test_user, setup_test_app_data};
    use chrono::{DateTime, Duration, Utc};

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    fn request(user_id: i32, amenity_id: i32, start: i64, duration: Duration) -> BookingRequest {
        BookingRequest {
            user_id,
            amenity_id,
            start_time: at(start),
            end_time: at(start) + duration,
            purpose: None,
        }
    }

    #[tokio::test]
    async fn test_save_and_list_bookings() {
        let app_data = setup_test_app_data().await;
        let user_id = create_test_user(&app_data, "asha", "password123").await;
        let pool = app_data.amenity_store.add_amenity("Pool", None).await.unwrap();
        let coordinator = BookingCoordinator::new(app_data);
        let ctx = RequestContext::new();

        coordinator.save_booking(&ctx, request(user_id, pool.id, 2_000_000, Duration::hours(2))).await.unwrap();
        coordinator.save_booking(&ctx, request(user_id, pool.id, 1_000_000, Duration::hours(1))).await.unwrap();

        let bookings = coordinator.get_users_bookings(user_id).await.unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].start_time, at(1_000_000));
        assert_eq!(bookings[1].start_time, at(2_000_000));
        assert_eq!(bookings[0].amenity_name, "Pool");
        assert_eq!(bookings[0].status, "Requested");
    }

    #[tokio::test]
    async fn test_no_bookings_returns_empty_list() {
        let app_data = setup_test_app_data().await;
        let user_id = create_test_user(&app_data, "asha", "password123").await;
        let coordinator = BookingCoordinator::new(app_data);

        assert!(coordinator.get_users_bookings(user_id).await.unwrap().is_empty());
        assert!(coordinator.get_users_bookings(9_999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_empty_or_inverted_window() {
        let app_data = setup_test_app_data().await;
        let user_id = create_test_user(&app_data, "asha", "password123").await;
        let pool = app_data.amenity_store.add_amenity("Pool", None).await.unwrap();
        let coordinator = BookingCoordinator::new(app_data);

        for duration in [Duration::zero(), Duration::hours(-1)] {
            let result = coordinator
                .save_booking(&RequestContext::new(), request(user_id, pool.id, 1_000_000, duration))
                .await;
            assert!(matches!(
                result,
                Err(InternalError::Booking(BookingError::InvalidTimeWindow { .. }))
            ));
        }
        assert!(coordinator.get_users_bookings(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_unknown_user_or_amenity() {
        let app_data = setup_test_app_data().await;
        let user_id = create_test_user(&app_data, "asha", "password123").await;
        let pool = app_data.amenity_store.add_amenity("Pool", None).await.unwrap();
        let coordinator = BookingCoordinator::new(app_data);
        let ctx = RequestContext::new();

        let unknown_user = coordinator
            .save_booking(&ctx, request(user_id + 50, pool.id, 1_000_000, Duration::hours(1)))
            .await;
        assert!(matches!(unknown_user, Err(InternalError::Booking(BookingError::UserNotFound { .. }))));

        let unknown_amenity = coordinator
            .save_booking(&ctx, request(user_id, pool.id + 50, 1_000_000, Duration::hours(1)))
            .await;
        assert!(matches!(
            unknown_amenity,
            Err(InternalError::Booking(BookingError::AmenityNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_rejects_disabled_owner() {
        let app_data = setup_test_app_data().await;
        let user_id = create_test_user(&app_data, "asha", "password123").await;
        let pool = app_data.amenity_store.add_amenity("Pool", None).await.unwrap();
        app_data.credential_store.set_authorised("asha", false).await.unwrap();
        let coordinator = BookingCoordinator::new(app_data);

        let result = coordinator
            .save_booking(&RequestContext::new(), request(user_id, pool.id, 1_000_000, Duration::hours(1)))
            .await;

        assert!(matches!(result, Err(InternalError::Booking(BookingError::UserNotFound { .. }))));
        assert!(coordinator.get_users_bookings(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_amenities() {
        let app_data = setup_test_app_data().await;
        app_data.amenity_store.add_amenity("Pool", Some("Rooftop".to_string())).await.unwrap();
        let coordinator = BookingCoordinator::new(app_data);

        let amenities = coordinator.list_amenities().await.unwrap();
        assert_eq!(amenities.len(), 1);
        assert_eq!(amenities[0].description.as_deref(), Some("Rooftop"));
    }
}
