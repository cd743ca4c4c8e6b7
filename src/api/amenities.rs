use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::app_data::AppData;
use crate::coordinators::BookingCoordinator;
use crate::errors::BookingApiError;
use crate::types::dto::booking::AmenityDto;

/// Amenity catalogue endpoints
pub struct AmenitiesApi {
    booking_coordinator: Arc<BookingCoordinator>,
}

impl AmenitiesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            booking_coordinator: Arc::new(BookingCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum AmenityTags {
    /// Bookable society facilities
    Amenities,
}

#[OpenApi]
impl AmenitiesApi {
    /// List all amenities ordered by name
    #[oai(path = "/amenities", method = "get", tag = "AmenityTags::Amenities")]
    async fn list_amenities(&self) -> Result<Json<Vec<AmenityDto>>, BookingApiError> {
        self.booking_coordinator
            .list_amenities()
            .await
            .map(Json)
            .map_err(BookingApiError::from_internal_error)
    }
}
