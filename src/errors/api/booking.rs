use crate::errors::internal::{BookingError, InternalError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Error types for the booking and amenity endpoints
#[derive(ApiResponse, Debug)]
pub enum BookingApiError {
    /// Booking payload is invalid
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Referenced user or amenity does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl BookingApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        BookingApiError::BadRequest(ErrorResponse::json("invalid_booking", message, 400))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        BookingApiError::NotFound(ErrorResponse::json("not_found", message, 404))
    }

    /// Convert InternalError to BookingApiError
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Booking(BookingError::InvalidTimeWindow { .. }) => {
                tracing::debug!("{}", err);
                Self::bad_request("Booking end time must be after its start time")
            }
            InternalError::Booking(BookingError::AmenityNotFound { amenity_id }) => {
                tracing::debug!("Amenity not found: {}", amenity_id);
                Self::not_found("Amenity not found")
            }
            InternalError::Booking(BookingError::UserNotFound { user_id }) => {
                tracing::debug!("Booking owner not found: {}", user_id);
                Self::not_found("User not found")
            }
            _ => {
                tracing::error!("Unexpected error in booking operation: {}", err);
                BookingApiError::InternalError(ErrorResponse::internal())
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            BookingApiError::BadRequest(json) => json.0.message.clone(),
            BookingApiError::NotFound(json) => json.0.message.clone(),
            BookingApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for BookingApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
