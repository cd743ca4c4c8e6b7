use std::collections::{BTreeSet, HashMap};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::errors::internal::ResidenceError;
use crate::types::db::{flat, parking, user_flat, user_parking};
use crate::types::internal::residence::Residence;

/// Flat and parking catalogues and their assignment to profiles
pub struct ResidenceStore {
    db: DatabaseConnection,
}

impl ResidenceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_flats(&self) -> Result<Vec<flat::Model>, InternalError> {
        flat::Entity::find()
            .order_by_asc(flat::Column::FlatNumber)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_flats", e))
    }

    pub async fn list_parkings(&self) -> Result<Vec<parking::Model>, InternalError> {
        parking::Entity::find()
            .order_by_asc(parking::Column::SlotNumber)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_parkings", e))
    }

    pub async fn add_flat(&self, flat_number: &str, wing: Option<String>) -> Result<flat::Model, InternalError> {
        let flat_number = flat_number.trim();

        let existing = flat::Entity::find()
            .filter(flat::Column::FlatNumber.eq(flat_number))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("add_flat", e))?;

        if existing > 0 {
            return Err(ResidenceError::DuplicateFlat(flat_number.to_string()).into());
        }

        flat::ActiveModel {
            flat_number: Set(flat_number.to_string()),
            wing: Set(wing),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("add_flat", e))
    }

    pub async fn add_parking(&self, slot_number: &str) -> Result<parking::Model, InternalError> {
        let slot_number = slot_number.trim();

        let existing = parking::Entity::find()
            .filter(parking::Column::SlotNumber.eq(slot_number))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("add_parking", e))?;

        if existing > 0 {
            return Err(ResidenceError::DuplicateParking(slot_number.to_string()).into());
        }

        parking::ActiveModel {
            slot_number: Set(slot_number.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("add_parking", e))
    }

    /// Flats and parking slots per profile id
    ///
    /// Profiles holding nothing are absent from the map.
    pub async fn residences_for(&self, user_info_ids: &[i32]) -> Result<HashMap<i32, Residence>, InternalError> {
        let mut residences: HashMap<i32, Residence> = HashMap::new();
        if user_info_ids.is_empty() {
            return Ok(residences);
        }

        let flats = user_flat::Entity::find()
            .filter(user_flat::Column::UserInfoId.is_in(user_info_ids.iter().copied()))
            .find_also_related(flat::Entity)
            .order_by_asc(flat::Column::FlatNumber)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("residences_for", e))?;

        for (link, flat) in flats {
            if let Some(flat) = flat {
                residences.entry(link.user_info_id).or_default().flats.push(flat);
            }
        }

        let parkings = user_parking::Entity::find()
            .filter(user_parking::Column::UserInfoId.is_in(user_info_ids.iter().copied()))
            .find_also_related(parking::Entity)
            .order_by_asc(parking::Column::SlotNumber)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("residences_for", e))?;

        for (link, parking) in parkings {
            if let Some(parking) = parking {
                residences.entry(link.user_info_id).or_default().parkings.push(parking);
            }
        }

        Ok(residences)
    }

    /// Make `flat_ids` the complete set of flats held by a profile
    ///
    /// Every id must exist. Runs on the caller's connection so it can share
    /// the profile update's transaction.
    pub(crate) async fn replace_flats(
        conn: &impl ConnectionTrait,
        user_info_id: i32,
        flat_ids: &[i32],
    ) -> Result<(), InternalError> {
        let wanted: BTreeSet<i32> = flat_ids.iter().copied().collect();

        let found: BTreeSet<i32> = flat::Entity::find()
            .filter(flat::Column::Id.is_in(wanted.iter().copied()))
            .all(conn)
            .await
            .map_err(|e| InternalError::database("replace_flats", e))?
            .into_iter()
            .map(|f| f.id)
            .collect();

        if let Some(&flat_id) = wanted.difference(&found).next() {
            return Err(ResidenceError::FlatNotFound { flat_id }.into());
        }

        user_flat::Entity::delete_many()
            .filter(user_flat::Column::UserInfoId.eq(user_info_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("replace_flats", e))?;

        if wanted.is_empty() {
            return Ok(());
        }

        user_flat::Entity::insert_many(wanted.into_iter().map(|flat_id| user_flat::ActiveModel {
            user_info_id: Set(user_info_id),
            flat_id: Set(flat_id),
        }))
        .exec_without_returning(conn)
        .await
        .map_err(|e| InternalError::database("replace_flats", e))?;

        Ok(())
    }

    /// Make `parking_ids` the complete set of parking slots held by a profile
    pub(crate) async fn replace_parkings(
        conn: &impl ConnectionTrait,
        user_info_id: i32,
        parking_ids: &[i32],
    ) -> Result<(), InternalError> {
        let wanted: BTreeSet<i32> = parking_ids.iter().copied().collect();

        let found: BTreeSet<i32> = parking::Entity::find()
            .filter(parking::Column::Id.is_in(wanted.iter().copied()))
            .all(conn)
            .await
            .map_err(|e| InternalError::database("replace_parkings", e))?
            .into_iter()
            .map(|p| p.id)
            .collect();

        if let Some(&parking_id) = wanted.difference(&found).next() {
            return Err(ResidenceError::ParkingNotFound { parking_id }.into());
        }

        user_parking::Entity::delete_many()
            .filter(user_parking::Column::UserInfoId.eq(user_info_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("replace_parkings", e))?;

        if wanted.is_empty() {
            return Ok(());
        }

        user_parking::Entity::insert_many(wanted.into_iter().map(|parking_id| user_parking::ActiveModel {
            user_info_id: Set(user_info_id),
            parking_id: Set(parking_id),
        }))
        .exec_without_returning(conn)
        .await
        .map_err(|e| InternalError::database("replace_parkings", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::CredentialStore;
    use crate::stores::credential_store::NewUser;
    use crate::test::utils::{sample_profile, setup_test_db};
    use crate::types::db::user_info;

    async fn setup() -> (DatabaseConnection, ResidenceStore, i32) {
        let db = setup_test_db().await;
        let user_id = CredentialStore::new(db.clone())
            .add_user(NewUser {
                username: "asha".to_string(),
                password_hash: "$argon2id$v=19$placeholder".to_string(),
                profile: sample_profile("Asha", "Rao"),
            })
            .await
            .unwrap();
        let info = user_info::Entity::find()
            .filter(user_info::Column::UserId.eq(user_id))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        (db.clone(), ResidenceStore::new(db), info.id)
    }

    #[tokio::test]
    async fn test_catalogues_sorted_and_unique() {
        let (_db, store, _) = setup().await;
        store.add_flat("B-204", Some("B".to_string())).await.unwrap();
        store.add_flat("A-101", Some("A".to_string())).await.unwrap();
        store.add_parking("P-12").await.unwrap();

        let numbers: Vec<String> = store.list_flats().await.unwrap().into_iter().map(|f| f.flat_number).collect();
        assert_eq!(numbers, vec!["A-101", "B-204"]);
        assert_eq!(store.list_parkings().await.unwrap().len(), 1);

        assert!(matches!(
            store.add_flat(" A-101 ", None).await,
            Err(InternalError::Residence(ResidenceError::DuplicateFlat(_)))
        ));
        assert!(matches!(
            store.add_parking("P-12").await,
            Err(InternalError::Residence(ResidenceError::DuplicateParking(_)))
        ));
    }

    #[tokio::test]
    async fn test_replace_assignments() {
        let (db, store, info_id) = setup().await;
        let a = store.add_flat("A-101", None).await.unwrap();
        let b = store.add_flat("B-204", None).await.unwrap();
        let p = store.add_parking("P-12").await.unwrap();

        ResidenceStore::replace_flats(&db, info_id, &[b.id, a.id, a.id]).await.unwrap();
        ResidenceStore::replace_parkings(&db, info_id, &[p.id]).await.unwrap();

        let residence = store.residences_for(&[info_id]).await.unwrap().remove(&info_id).unwrap();
        assert_eq!(residence.flats, vec![a.clone(), b]);
        assert_eq!(residence.parkings, vec![p]);

        ResidenceStore::replace_flats(&db, info_id, &[a.id]).await.unwrap();
        ResidenceStore::replace_parkings(&db, info_id, &[]).await.unwrap();

        let residence = store.residences_for(&[info_id]).await.unwrap().remove(&info_id).unwrap();
        assert_eq!(residence.flats, vec![a]);
        assert!(residence.parkings.is_empty());
    }

    #[tokio::test]
    async fn test_replace_with_unknown_flat_keeps_existing() {
        let (db, store, info_id) = setup().await;
        let a = store.add_flat("A-101", None).await.unwrap();
        ResidenceStore::replace_flats(&db, info_id, &[a.id]).await.unwrap();

        let result = ResidenceStore::replace_flats(&db, info_id, &[a.id, 999]).await;
        assert!(matches!(
            result,
            Err(InternalError::Residence(ResidenceError::FlatNotFound { flat_id: 999 }))
        ));

        let residence = store.residences_for(&[info_id]).await.unwrap().remove(&info_id).unwrap();
        assert_eq!(residence.flats, vec![a]);
    }

    #[tokio::test]
    async fn test_residences_for_profile_without_assignments() {
        let (_db, store, info_id) = setup().await;

        assert!(store.residences_for(&[info_id]).await.unwrap().is_empty());
        assert!(store.residences_for(&[]).await.unwrap().is_empty());
    }
}
