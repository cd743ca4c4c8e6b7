// API-facing error types
pub mod auth;
pub mod booking;
pub mod user;

// Re-exports for convenience
pub use auth::AuthError;
pub use booking::BookingApiError;
pub use user::UserApiError;
