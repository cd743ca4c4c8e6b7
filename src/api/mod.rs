// API layer - HTTP endpoints
pub mod amenities;
pub mod data;
pub mod health;
pub mod users;

pub use amenities::AmenitiesApi;
pub use data::DataApi;
pub use health::HealthApi;
pub use users::UsersApi;
