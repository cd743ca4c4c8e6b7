use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::stores::ResidenceStore;
use crate::types::dto::residence::{FlatDto, ParkingDto};

/// Read access to the flat and parking catalogues
pub struct ResidenceCoordinator {
    residence_store: Arc<ResidenceStore>,
}

impl ResidenceCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            residence_store: app_data.residence_store.clone(),
        }
    }

    pub async fn list_flats(&self) -> Result<Vec<FlatDto>, InternalError> {
        let flats = self.residence_store.list_flats().await?;
        Ok(flats.into_iter().map(FlatDto::from).collect())
    }

    pub async fn list_parkings(&self) -> Result<Vec<ParkingDto>, InternalError> {
        let parkings = self.residence_store.list_parkings().await?;
        Ok(parkings.into_iter().map(ParkingDto::from).collect())
    }
}
