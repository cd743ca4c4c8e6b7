use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::InternalError;
use crate::types::db::{amenity, amenity_booking};

/// A reservation ready to persist; times are unix seconds
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i32,
    pub amenity_id: i32,
    pub start_time: i64,
    pub end_time: i64,
    pub purpose: Option<String>,
}

pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a booking in the `Requested` state
    pub async fn add_booking(&self, booking: NewBooking) -> Result<amenity_booking::Model, InternalError> {
        amenity_booking::ActiveModel {
            user_id: Set(booking.user_id),
            amenity_id: Set(booking.amenity_id),
            start_time: Set(booking.start_time),
            end_time: Set(booking.end_time),
            purpose: Set(booking.purpose),
            status: Set(amenity_booking::STATUS_REQUESTED.to_string()),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("add_booking", e))
    }

    /// Bookings owned by a user, ordered by start time then id
    pub async fn get_bookings_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<(amenity_booking::Model, amenity::Model)>, InternalError> {
        let rows = amenity_booking::Entity::find()
            .filter(amenity_booking::Column::UserId.eq(user_id))
            .find_also_related(amenity::Entity)
            .order_by_asc(amenity_booking::Column::StartTime)
            .order_by_asc(amenity_booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("get_bookings_for_user", e))?;

        Ok(rows
            .into_iter()
            .filter_map(|(booking, amenity)| amenity.map(|a| (booking, a)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::credential_store::{CredentialStore, NewUser};
    use crate::stores::AmenityStore;
    use crate::test::utils::{sample_profile, setup_test_db};

    async fn setup() -> (BookingStore, i32, i32) {
        let db = setup_test_db().await;
        let user_id = CredentialStore::new(db.clone())
            .add_user(NewUser {
                username: "asha".to_string(),
                password_hash: "$argon2id$v=19$placeholder".to_string(),
                profile: sample_profile("Asha", "Rao"),
            })
            .await
            .unwrap();
        let amenity = AmenityStore::new(db.clone()).add_amenity("Club House", None).await.unwrap();
        (BookingStore::new(db), user_id, amenity.id)
    }

    fn booking(user_id: i32, amenity_id: i32, start_time: i64) -> NewBooking {
        NewBooking {
            user_id,
            amenity_id,
            start_time,
            end_time: start_time + 3600,
            purpose: Some("Birthday".to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_booking_is_requested() {
        let (store, user_id, amenity_id) = setup().await;

        let saved = store.add_booking(booking(user_id, amenity_id, 1_000)).await.unwrap();

        assert_eq!(saved.status, amenity_booking::STATUS_REQUESTED);
        assert_eq!(saved.end_time - saved.start_time, 3600);
    }

    #[tokio::test]
    async fn test_bookings_ordered_by_start_time_then_id() {
        let (store, user_id, amenity_id) = setup().await;
        let late = store.add_booking(booking(user_id, amenity_id, 9_000)).await.unwrap();
        let early_a = store.add_booking(booking(user_id, amenity_id, 1_000)).await.unwrap();
        let early_b = store.add_booking(booking(user_id, amenity_id, 1_000)).await.unwrap();

        let ids: Vec<i32> = store
            .get_bookings_for_user(user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|(b, _)| b.id)
            .collect();

        assert_eq!(ids, vec![early_a.id, early_b.id, late.id]);
    }

    #[tokio::test]
    async fn test_no_bookings_is_empty() {
        let (store, user_id, _) = setup().await;
        assert!(store.get_bookings_for_user(user_id).await.unwrap().is_empty());
    }
}
