use std::sync::Arc;

use crate::config::database::DatabaseConnections;
use crate::config::{BootstrapSettings, SecretManager};
use crate::providers::{AuthenticationProvider, CryptoProvider, TokenProvider};
use crate::stores::{AmenityStore, BookingStore, CredentialStore, ResidenceStore, UserStore};

/// Centralized application data
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ↓ creates once
///   ├─ stores (credential, user, booking, amenity, residence)
///   └─ providers (crypto, token, authentication)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   ├─ AuthCoordinator::new(app_data)
///   ├─ UserCoordinator::new(app_data)
///   ├─ BookingCoordinator::new(app_data)
///   └─ AdminCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub connections: DatabaseConnections,
    pub secret_manager: Arc<SecretManager>,
    pub credential_store: Arc<CredentialStore>,
    pub user_store: Arc<UserStore>,
    pub booking_store: Arc<BookingStore>,
    pub amenity_store: Arc<AmenityStore>,
    pub residence_store: Arc<ResidenceStore>,
    pub providers: Providers,
}

pub struct Providers {
    pub crypto_provider: Arc<CryptoProvider>,
    pub token_provider: Arc<TokenProvider>,
    pub authentication_provider: Arc<AuthenticationProvider>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// Database connections should be initialized and migrated before calling this.
    pub fn init(
        connections: DatabaseConnections,
        settings: &BootstrapSettings,
        secret_manager: Arc<SecretManager>,
    ) -> Self {
        tracing::debug!("Creating stores...");
        let db = connections.db.clone();
        let credential_store = Arc::new(CredentialStore::new(db.clone()));
        let user_store = Arc::new(UserStore::new(db.clone()));
        let booking_store = Arc::new(BookingStore::new(db.clone()));
        let amenity_store = Arc::new(AmenityStore::new(db.clone()));
        let residence_store = Arc::new(ResidenceStore::new(db));

        tracing::debug!("Creating providers...");
        let crypto_provider = Arc::new(CryptoProvider::new(
            secret_manager.password_pepper().to_string(),
        ));
        let token_provider = Arc::new(TokenProvider::new(
            secret_manager.clone(),
            settings.token_expiration_minutes(),
        ));
        let authentication_provider = Arc::new(AuthenticationProvider::new(
            credential_store.clone(),
            crypto_provider.clone(),
        ));

        tracing::info!("AppData initialization complete");

        Self {
            connections,
            secret_manager,
            credential_store,
            user_store,
            booking_store,
            amenity_store,
            residence_store,
            providers: Providers {
                crypto_provider,
                token_provider,
                authentication_provider,
            },
        }
    }
}
