use crate::errors::internal::{AuthorizationError, CredentialError, InternalError, ResidenceError, UserError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Error types for the user profile endpoints
#[derive(ApiResponse, Debug)]
pub enum UserApiError {
    /// Missing, invalid or expired bearer token on a protected endpoint
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Caller lacks the required role
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// User, profile, flat or parking slot does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Profile was modified since it was read
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Username already exists
    #[oai(status = 400)]
    DuplicateUsername(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl UserApiError {
    pub fn unauthorized() -> Self {
        UserApiError::Unauthorized(ErrorResponse::json(
            "unauthorized",
            "A valid bearer token is required",
            401,
        ))
    }

    pub fn forbidden(role: &str) -> Self {
        UserApiError::Forbidden(ErrorResponse::json(
            "forbidden",
            format!("{} role required", role),
            403,
        ))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        UserApiError::NotFound(ErrorResponse::json("not_found", message, 404))
    }

    pub fn conflict() -> Self {
        UserApiError::Conflict(ErrorResponse::json(
            "stale_version",
            "The profile was changed by someone else. Reload and try again",
            409,
        ))
    }

    pub fn duplicate_username() -> Self {
        UserApiError::DuplicateUsername(ErrorResponse::json(
            "duplicate_username",
            "Username already exists",
            400,
        ))
    }

    /// Convert InternalError to UserApiError
    ///
    /// Not-found and conflict cases get their own status codes; every other
    /// failure is logged and reported as a generic 500.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Authorization(AuthorizationError::MissingPrincipal) => {
                tracing::debug!("Unauthenticated call to protected endpoint");
                Self::unauthorized()
            }
            InternalError::Authorization(AuthorizationError::RoleRequired { role }) => {
                tracing::warn!("Authorization denied: {} role required", role);
                Self::forbidden(role)
            }
            InternalError::User(UserError::UserIdNotFound { user_id }) => {
                tracing::debug!("User not found: {}", user_id);
                Self::not_found("User not found")
            }
            InternalError::User(UserError::UserInfoNotFound { user_info_id }) => {
                tracing::debug!("User info not found: {}", user_info_id);
                Self::not_found("User info not found")
            }
            InternalError::Residence(ResidenceError::FlatNotFound { flat_id }) => {
                tracing::debug!("Flat not found: {}", flat_id);
                Self::not_found("Flat not found")
            }
            InternalError::Residence(ResidenceError::ParkingNotFound { parking_id }) => {
                tracing::debug!("Parking slot not found: {}", parking_id);
                Self::not_found("Parking slot not found")
            }
            InternalError::User(UserError::StaleVersion { .. }) => {
                tracing::debug!("{}", err);
                Self::conflict()
            }
            InternalError::Credential(CredentialError::DuplicateUsername(username)) => {
                tracing::warn!("Duplicate username attempt: {}", username);
                Self::duplicate_username()
            }
            _ => {
                tracing::error!("Unexpected error in user operation: {}", err);
                UserApiError::InternalError(ErrorResponse::internal())
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            UserApiError::Unauthorized(json) => json.0.message.clone(),
            UserApiError::Forbidden(json) => json.0.message.clone(),
            UserApiError::NotFound(json) => json.0.message.clone(),
            UserApiError::Conflict(json) => json.0.message.clone(),
            UserApiError::DuplicateUsername(json) => json.0.message.clone(),
            UserApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for UserApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_missing_user_maps_to_not_found() {
        let err = UserApiError::from_internal_error(UserError::UserIdNotFound { user_id: 3 }.into());
        assert!(matches!(err, UserApiError::NotFound(_)));
    }

    #[test]
    fn test_role_required_maps_to_forbidden() {
        let err = UserApiError::from_internal_error(
            AuthorizationError::RoleRequired { role: "Member".to_string() }.into(),
        );
        assert!(matches!(err, UserApiError::Forbidden(_)));
        assert_eq!(err.message(), "Member role required");
    }

    #[test]
    fn test_missing_principal_maps_to_unauthorized() {
        let err = UserApiError::from_internal_error(AuthorizationError::MissingPrincipal.into());
        assert!(matches!(err, UserApiError::Unauthorized(_)));
    }

    #[test]
    fn test_stale_version_maps_to_conflict() {
        let err = UserApiError::from_internal_error(
            UserError::StaleVersion { user_info_id: 1, expected_version: 0 }.into(),
        );
        assert!(matches!(err, UserApiError::Conflict(_)));
    }

    #[test]
    fn test_unknown_flat_or_parking_maps_to_not_found() {
        let flat = UserApiError::from_internal_error(ResidenceError::FlatNotFound { flat_id: 9 }.into());
        assert!(matches!(flat, UserApiError::NotFound(_)));
        assert_eq!(flat.message(), "Flat not found");

        let parking = UserApiError::from_internal_error(ResidenceError::ParkingNotFound { parking_id: 9 }.into());
        assert!(matches!(parking, UserApiError::NotFound(_)));
    }

    #[test]
    fn test_database_error_hides_details() {
        let err = UserApiError::from_internal_error(InternalError::database(
            "search_user_info",
            DbErr::Custom("disk I/O error".to_string()),
        ));

        assert!(matches!(err, UserApiError::InternalError(_)));
        assert!(!err.message().contains("disk"));
    }
}
