use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::role_provider::extract_roles;
use crate::providers::{AuthenticationProvider, TokenProvider};
use crate::stores::UserStore;
use crate::types::dto::auth::AuthenticatedUserDto;
use crate::types::internal::context::RequestContext;
use crate::types::timestamp_to_datetime;

/// Authentication coordinator that orchestrates the logon workflow
pub struct AuthCoordinator {
    authentication_provider: Arc<AuthenticationProvider>,
    token_provider: Arc<TokenProvider>,
    user_store: Arc<UserStore>,
}

impl AuthCoordinator {
    /// Create AuthCoordinator from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authentication_provider: app_data.providers.authentication_provider.clone(),
            token_provider: app_data.providers.token_provider.clone(),
            user_store: app_data.user_store.clone(),
        }
    }

    /// Orchestrate a complete logon
    ///
    /// 1. Verify credentials and resolve roles
    /// 2. Issue a token carrying those roles
    /// 3. Load the profile for the response
    ///
    /// The stored last logon is returned unchanged; recording the new visit
    /// is a separate call.
    pub async fn authenticate(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUserDto, InternalError> {
        let principal = self.authentication_provider.authenticate(username, password).await?;
        let token = self.token_provider.issue_token(&principal)?;
        let (user, info) = self.user_store.get_authorised_user(principal.user_id).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            ip = ?ctx.ip_address,
            source = ?ctx.source,
            user_id = principal.user_id,
            "User authenticated"
        );

        Ok(AuthenticatedUserDto {
            username: principal.username,
            roles: extract_roles(principal.roles),
            token,
            user_id: user.id,
            last_logon: user.last_logon.map(timestamp_to_datetime),
            first_name: info.prim_first_name,
            last_name: info.prim_last_name,
            user_info_id: info.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::CredentialError;
    use crate::test::utils::{create_test_user, setup_test_app_data};

    #[tokio::test]
    async fn test_authenticate_builds_full_response() {
        let app_data = setup_test_app_data().await;
        let user_id = create_test_user(&app_data, "asha", "correct-password").await;
        app_data.user_store.update_last_logon(user_id, 1_700_000_000).await.unwrap();
        let coordinator = AuthCoordinator::new(app_data.clone());

        let dto = coordinator
            .authenticate(&RequestContext::new(), "asha", "correct-password")
            .await
            .unwrap();

        assert_eq!(dto.username, "asha");
        assert_eq!(dto.user_id, user_id);
        assert_eq!(dto.roles.get("Member"), Some(&true));
        assert_eq!(dto.roles.len(), 1);
        assert_eq!(dto.first_name, "asha");
        assert_eq!(dto.last_name, "Resident");
        assert_eq!(dto.last_logon.map(|t| t.timestamp()), Some(1_700_000_000));

        let principal = app_data.providers.token_provider.validate_token(&dto.token).unwrap();
        assert_eq!(principal.user_id, user_id);
    }

    #[tokio::test]
    async fn test_authenticate_does_not_touch_last_logon() {
        let app_data = setup_test_app_data().await;
        let user_id = create_test_user(&app_data, "asha", "correct-password").await;
        let coordinator = AuthCoordinator::new(app_data.clone());

        let dto = coordinator
            .authenticate(&RequestContext::new(), "asha", "correct-password")
            .await
            .unwrap();
        assert!(dto.last_logon.is_none());

        let (user, _) = app_data.user_store.get_authorised_user(user_id).await.unwrap();
        assert!(user.last_logon.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_bad_password() {
        let app_data = setup_test_app_data().await;
        create_test_user(&app_data, "asha", "correct-password").await;
        let coordinator = AuthCoordinator::new(app_data);

        let result = coordinator
            .authenticate(&RequestContext::new(), "asha", "nope-nope")
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));
    }
}
