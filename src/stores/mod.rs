// Stores layer - Data access and repository pattern
pub mod amenity_store;
pub mod booking_store;
pub mod credential_store;
pub mod residence_store;
pub mod user_store;

pub use amenity_store::AmenityStore;
pub use booking_store::BookingStore;
pub use credential_store::CredentialStore;
pub use residence_store::ResidenceStore;
pub use user_store::UserStore;
