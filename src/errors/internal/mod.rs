use thiserror::Error;

pub mod authorization;
pub mod booking;
pub mod credential;
pub mod database;
pub mod residence;
pub mod user;

pub use authorization::AuthorizationError;
pub use booking::BookingError;
pub use credential::CredentialError;
pub use database::DatabaseError;
pub use residence::ResidenceError;
pub use user::UserError;

/// Internal error type for store, provider and coordinator operations
///
/// Hybrid design separates infrastructure errors (shared) from domain errors.
/// Not exposed via API - endpoints must convert to one of the API error enums.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Residence(#[from] ResidenceError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database(DatabaseError::Operation {
            operation: operation.into(),
            source,
        })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> Self {
        Self::Database(DatabaseError::TransactionBegin { source })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> Self {
        Self::Database(DatabaseError::TransactionCommit { source })
    }

    /// Create a crypto error with context
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
