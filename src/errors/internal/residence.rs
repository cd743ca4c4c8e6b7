use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResidenceError {
    #[error("Flat not found: {flat_id}")]
    FlatNotFound { flat_id: i32 },

    #[error("Parking slot not found: {parking_id}")]
    ParkingNotFound { parking_id: i32 },

    #[error("Flat already exists: {0}")]
    DuplicateFlat(String),

    #[error("Parking slot already exists: {0}")]
    DuplicateParking(String),
}
