use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Amenity not found: {amenity_id}")]
    AmenityNotFound { amenity_id: i32 },

    #[error("Booking owner not found: {user_id}")]
    UserNotFound { user_id: i32 },

    #[error("Booking must end after it starts (start: {start_time}, end: {end_time})")]
    InvalidTimeWindow { start_time: i64, end_time: i64 },

    #[error("Amenity already exists: {0}")]
    DuplicateAmenity(String),
}
