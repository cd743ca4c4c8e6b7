// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate.

pub mod authentication_provider;
pub mod crypto_provider;
pub mod role_provider;
pub mod token_provider;

// Re-export providers for clean imports
pub use authentication_provider::AuthenticationProvider;
pub use crypto_provider::CryptoProvider;
pub use token_provider::TokenProvider;
