use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown username, wrong password or disabled account
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    DuplicateUsername(String),

    #[error("User not found: {0}")]
    UsernameNotFound(String),

    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("Invalid token: {token_type} - {reason}")]
    InvalidToken {
        token_type: String,
        reason: String,
    },

    #[error("Expired token: {0}")]
    ExpiredToken(String),
}

impl CredentialError {
    /// Create an invalid token error
    pub fn invalid_token(token_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            token_type: token_type.into(),
            reason: reason.into(),
        }
    }
}
