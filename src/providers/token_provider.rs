use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use jsonwebtoken::errors::ErrorKind;
use uuid::Uuid;

use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::internal::auth::{Claims, Principal};

/// Issues and validates HS256 bearer tokens
///
/// The token's role list is fixed at issuance. A role change becomes visible
/// only in tokens issued afterwards.
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
    expiration_minutes: i64,
}

impl TokenProvider {
    pub fn new(secret_manager: Arc<SecretManager>, expiration_minutes: i64) -> Self {
        Self {
            secret_manager,
            expiration_minutes,
        }
    }

    pub fn expiration_minutes(&self) -> i64 {
        self.expiration_minutes
    }

    /// Sign a token for an authenticated principal
    pub fn issue_token(&self, principal: &Principal) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: principal.user_id.to_string(),
            username: principal.username.clone(),
            roles: principal.roles.iter().cloned().collect(),
            exp: now + self.expiration_minutes * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))
    }

    /// Validate a token and return the principal it was issued for
    pub fn validate_token(&self, token: &str) -> Result<Principal, InternalError> {
        let claims = self.decode_claims(token)?;

        Principal::try_from(claims)
            .map_err(|_| CredentialError::invalid_token("jwt", "subject is not a user id").into())
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => CredentialError::ExpiredToken("jwt".to_string()).into(),
            _ => CredentialError::invalid_token("jwt", "invalid signature or malformed").into(),
        })
    }
}
