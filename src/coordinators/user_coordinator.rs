use std::sync::Arc;

use chrono::Utc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::CryptoProvider;
use crate::providers::role_provider::{ROLE_MEMBER, require_role};
use crate::stores::credential_store::NewUser;
use crate::stores::{CredentialStore, ResidenceStore, UserStore};
use crate::types::dto::user::{CreateUserRequest, UpdateUserInfoRequest, UserInfoDto, UserSummaryDto};
use crate::types::internal::context::RequestContext;

/// Handles user lookup, registration and profile maintenance
pub struct UserCoordinator {
    credential_store: Arc<CredentialStore>,
    user_store: Arc<UserStore>,
    residence_store: Arc<ResidenceStore>,
    crypto_provider: Arc<CryptoProvider>,
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: app_data.credential_store.clone(),
            user_store: app_data.user_store.clone(),
            residence_store: app_data.residence_store.clone(),
            crypto_provider: app_data.providers.crypto_provider.clone(),
        }
    }

    pub async fn get_authorised_user_by_id(&self, user_id: i32) -> Result<UserInfoDto, InternalError> {
        let (user, info) = self.user_store.get_authorised_user(user_id).await?;
        let mut residences = self.residence_store.residences_for(&[info.id]).await?;
        let residence = residences.remove(&info.id).unwrap_or_default();
        Ok(UserInfoDto::from((user, info, residence)))
    }

    pub async fn get_all_authorised_users(&self) -> Result<Vec<UserSummaryDto>, InternalError> {
        let rows = self.user_store.list_authorised_users().await?;
        Ok(rows.into_iter().map(UserSummaryDto::from).collect())
    }

    /// Record the current time as the user's last logon
    pub async fn update_last_logon(&self, ctx: &RequestContext, user_id: i32) -> Result<String, InternalError> {
        self.user_store.update_last_logon(user_id, Utc::now().timestamp()).await?;

        tracing::debug!(
            request_id = %ctx.request_id,
            ip = ?ctx.ip_address,
            source = ?ctx.source,
            user_id,
            "Last logon updated"
        );
        Ok(format!("Last logon updated for user {}", user_id))
    }

    /// Register a user; the password is hashed before anything is written
    pub async fn create_user(&self, ctx: &RequestContext, request: CreateUserRequest) -> Result<i32, InternalError> {
        let password_hash = self.crypto_provider.hash_password(request.password).await?;

        let user_id = self
            .credential_store
            .add_user(NewUser {
                username: request.username,
                password_hash,
                profile: request.profile,
            })
            .await?;

        tracing::debug!(
            request_id = %ctx.request_id,
            ip = ?ctx.ip_address,
            source = ?ctx.source,
            user_id,
            "User created"
        );
        Ok(user_id)
    }

    /// Update a profile; the caller must hold the Member role
    ///
    /// The role check runs before any store access. Flat and parking lists
    /// replace the current assignments when present.
    pub async fn update_user_info(
        &self,
        ctx: &RequestContext,
        request: UpdateUserInfoRequest,
    ) -> Result<(), InternalError> {
        let principal = require_role(ctx.principal.as_ref(), ROLE_MEMBER)?;

        let updated = self.user_store.update_user_info(&request).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            ip = ?ctx.ip_address,
            source = ?ctx.source,
            actor = principal.user_id,
            user_info_id = updated.id,
            version = updated.version,
            "User info updated"
        );
        Ok(())
    }

    pub async fn search_user_info(&self, search_text: &str) -> Result<Vec<UserInfoDto>, InternalError> {
        let rows = self.user_store.search_user_info(search_text).await?;
        let ids: Vec<i32> = rows.iter().map(|(_, info)| info.id).collect();
        let mut residences = self.residence_store.residences_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|(user, info)| {
                let residence = residences.remove(&info.id).unwrap_or_default();
                UserInfoDto::from((user, info, residence))
            })
            .collect())
    }
}
