use poem_openapi::{ApiResponse, Object, payload::Json};

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Standardized error response model
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn json(error: &str, message: impl Into<String>, status_code: u16) -> Json<Self> {
        Json(Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        })
    }

    /// Generic body for unexpected failures
    pub fn internal() -> Json<Self> {
        Self::json("internal_error", "An internal error occurred", 500)
    }
}

/// Success response without a body
#[derive(ApiResponse, Debug)]
pub enum EmptyResponse {
    /// Operation completed
    #[oai(status = 200)]
    Ok,
}
