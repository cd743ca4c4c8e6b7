use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::errors::internal::BookingError;
use crate::types::db::amenity;

/// Catalogue of bookable amenities
pub struct AmenityStore {
    db: DatabaseConnection,
}

impl AmenityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_amenities(&self) -> Result<Vec<amenity::Model>, InternalError> {
        amenity::Entity::find()
            .order_by_asc(amenity::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_amenities", e))
    }

    pub async fn add_amenity(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<amenity::Model, InternalError> {
        let name = name.trim();

        let existing = amenity::Entity::find()
            .filter(amenity::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("add_amenity", e))?;

        if existing > 0 {
            return Err(BookingError::DuplicateAmenity(name.to_string()).into());
        }

        amenity::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("add_amenity", e))
    }

    pub async fn amenity_exists(&self, amenity_id: i32) -> Result<bool, InternalError> {
        let count = amenity::Entity::find_by_id(amenity_id)
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("amenity_exists", e))?;

        Ok(count > 0)
    }
}
