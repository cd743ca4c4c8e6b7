// Database entities - SeaORM models
pub mod amenity;
pub mod amenity_booking;
pub mod flat;
pub mod parking;
pub mod role;
pub mod user;
pub mod user_flat;
pub mod user_info;
pub mod user_parking;
pub mod user_role;
