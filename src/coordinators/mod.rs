// Coordinators layer - Workflow orchestration
//
// Coordinators compose store and provider operations for specific API
// endpoints and CLI commands. They determine the sequence of operations
// without containing business logic themselves.

pub mod admin_coordinator;
pub mod auth_coordinator;
pub mod booking_coordinator;
pub mod residence_coordinator;
pub mod user_coordinator;

pub use admin_coordinator::AdminCoordinator;
pub use auth_coordinator::AuthCoordinator;
pub use booking_coordinator::BookingCoordinator;
pub use residence_coordinator::ResidenceCoordinator;
pub use user_coordinator::UserCoordinator;
