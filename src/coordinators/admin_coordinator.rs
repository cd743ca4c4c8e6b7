use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::stores::{AmenityStore, CredentialStore, ResidenceStore};
use crate::types::dto::booking::AmenityDto;
use crate::types::dto::residence::{FlatDto, ParkingDto};
use crate::types::internal::context::RequestContext;

/// Maintenance operations run from the command line
pub struct AdminCoordinator {
    credential_store: Arc<CredentialStore>,
    amenity_store: Arc<AmenityStore>,
    residence_store: Arc<ResidenceStore>,
}

impl AdminCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: app_data.credential_store.clone(),
            amenity_store: app_data.amenity_store.clone(),
            residence_store: app_data.residence_store.clone(),
        }
    }

    pub async fn add_amenity(
        &self,
        ctx: &RequestContext,
        name: &str,
        description: Option<String>,
    ) -> Result<AmenityDto, InternalError> {
        let created = self.amenity_store.add_amenity(name, description).await?;
        tracing::info!(actor = %ctx.actor_id, source = ?ctx.source, amenity_id = created.id, "Amenity added: {}", created.name);
        Ok(AmenityDto::from(created))
    }

    pub async fn add_flat(
        &self,
        ctx: &RequestContext,
        flat_number: &str,
        wing: Option<String>,
    ) -> Result<FlatDto, InternalError> {
        let created = self.residence_store.add_flat(flat_number, wing).await?;
        tracing::info!(actor = %ctx.actor_id, source = ?ctx.source, flat_id = created.id, "Flat added: {}", created.flat_number);
        Ok(FlatDto::from(created))
    }

    pub async fn add_parking(&self, ctx: &RequestContext, slot_number: &str) -> Result<ParkingDto, InternalError> {
        let created = self.residence_store.add_parking(slot_number).await?;
        tracing::info!(actor = %ctx.actor_id, source = ?ctx.source, parking_id = created.id, "Parking slot added: {}", created.slot_number);
        Ok(ParkingDto::from(created))
    }

    /// Returns false when the user already held the role
    pub async fn grant_role(&self, ctx: &RequestContext, username: &str, role: &str) -> Result<bool, InternalError> {
        let granted = self.credential_store.grant_role(username, role).await?;
        tracing::info!(actor = %ctx.actor_id, source = ?ctx.source, "grant {} to {}: changed={}", role, username, granted);
        Ok(granted)
    }

    /// Returns false when the user did not hold the role
    pub async fn revoke_role(&self, ctx: &RequestContext, username: &str, role: &str) -> Result<bool, InternalError> {
        let revoked = self.credential_store.revoke_role(username, role).await?;
        tracing::info!(actor = %ctx.actor_id, source = ?ctx.source, "revoke {} from {}: changed={}", role, username, revoked);
        Ok(revoked)
    }

    pub async fn set_authorised(&self, ctx: &RequestContext, username: &str, is_authorised: bool) -> Result<(), InternalError> {
        self.credential_store.set_authorised(username, is_authorised).await?;
        tracing::info!(actor = %ctx.actor_id, source = ?ctx.source, "set authorised={} for {}", is_authorised, username);
        Ok(())
    }
}
