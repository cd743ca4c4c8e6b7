use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::app_data::AppData;
use crate::coordinators::ResidenceCoordinator;
use crate::errors::UserApiError;
use crate::types::dto::residence::{FlatDto, ParkingDto};

/// Reference data used when editing a profile
pub struct DataApi {
    residence_coordinator: Arc<ResidenceCoordinator>,
}

impl DataApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            residence_coordinator: Arc::new(ResidenceCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum DataTags {
    /// Flats and parking slots
    Data,
}

#[OpenApi]
impl DataApi {
    /// List all flats ordered by number
    #[oai(path = "/data/flats", method = "get", tag = "DataTags::Data")]
    async fn list_flats(&self) -> Result<Json<Vec<FlatDto>>, UserApiError> {
        self.residence_coordinator
            .list_flats()
            .await
            .map(Json)
            .map_err(UserApiError::from_internal_error)
    }

    /// List all parking slots ordered by number
    #[oai(path = "/data/parkings", method = "get", tag = "DataTags::Data")]
    async fn list_parkings(&self) -> Result<Json<Vec<ParkingDto>>, UserApiError> {
        self.residence_coordinator
            .list_parkings()
            .await
            .map(Json)
            .map_err(UserApiError::from_internal_error)
    }
}
