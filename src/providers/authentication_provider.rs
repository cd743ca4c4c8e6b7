use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::crypto_provider::CryptoProvider;
use crate::stores::CredentialStore;
use crate::types::internal::auth::Principal;

/// Verifies username/password pairs and resolves the caller's roles
pub struct AuthenticationProvider {
    credential_store: Arc<CredentialStore>,
    crypto_provider: Arc<CryptoProvider>,
    /// Hash verified against when the username is unknown
    dummy_hash: OnceCell<String>,
}

impl AuthenticationProvider {
    pub fn new(credential_store: Arc<CredentialStore>, crypto_provider: Arc<CryptoProvider>) -> Self {
        Self {
            credential_store,
            crypto_provider,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Authenticate a logon attempt
    ///
    /// Unknown username, wrong password and a disabled account all fail with
    /// `CredentialError::InvalidCredentials`. An unknown username still pays
    /// for one password verification.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Principal, InternalError> {
        let user = match self.credential_store.get_user_for_auth(username).await {
            Ok(user) => user,
            Err(InternalError::Credential(CredentialError::UsernameNotFound(_))) => {
                tracing::debug!("Logon attempt for unknown username");
                self.verify_against_dummy(password).await?;
                return Err(CredentialError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let verified = self
            .crypto_provider
            .verify_password(&user.password_hash, password)
            .await?;

        if !verified {
            tracing::debug!(user_id = user.id, "Logon attempt with wrong password");
            return Err(CredentialError::InvalidCredentials.into());
        }

        if !user.is_authorised {
            tracing::warn!(user_id = user.id, "Logon attempt for disabled account");
            return Err(CredentialError::InvalidCredentials.into());
        }

        let roles = self.credential_store.get_roles_for_user(user.id).await?;

        Ok(Principal {
            user_id: user.id,
            username: user.username,
            roles: roles.into_iter().collect(),
        })
    }

    async fn verify_against_dummy(&self, password: &str) -> Result<(), InternalError> {
        let dummy_hash = self
            .dummy_hash
            .get_or_try_init(|| self.crypto_provider.hash_password("unknown-user-placeholder".to_string()))
            .await?;

        self.crypto_provider.verify_password(dummy_hash, password).await?;
        Ok(())
    }
}
