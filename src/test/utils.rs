// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::database::DatabaseConnections;
use crate::config::{BootstrapSettings, MockEnvironment, SecretManager};
use crate::stores::credential_store::NewUser;
use crate::types::dto::user::UserProfileFields;

/// In-memory SQLite database with all migrations applied
pub async fn setup_test_connections() -> DatabaseConnections {
    let connections = DatabaseConnections::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    connections
        .migrate()
        .await
        .expect("Failed to run migrations");

    connections
}

pub async fn setup_test_db() -> DatabaseConnection {
    setup_test_connections().await.db
}

/// Full AppData over an in-memory database and test secrets
pub async fn setup_test_app_data() -> Arc<AppData> {
    let env = Arc::new(MockEnvironment::with_test_secrets());
    let settings = BootstrapSettings::from_env_provider(env.clone())
        .expect("Failed to load test settings");
    let secret_manager = Arc::new(
        SecretManager::from_env_provider(env.as_ref()).expect("Failed to load test secrets"),
    );

    Arc::new(AppData::init(setup_test_connections().await, &settings, secret_manager))
}

/// Profile with a derived email address
pub fn sample_profile(first: &str, last: &str) -> UserProfileFields {
    UserProfileFields {
        prim_first_name: first.to_string(),
        prim_middle_name: None,
        prim_last_name: last.to_string(),
        sec_first_name: None,
        sec_middle_name: None,
        sec_last_name: None,
        email_id: Some(format!("{}@example.com", first.to_lowercase())),
        alter_email_id: None,
        primary_mobile: Some("9000000000".to_string()),
        secondary_mobile: None,
        correspondence_address: Some("A-101".to_string()),
        is_board_member: false,
        is_secondary_owner: false,
    }
}

/// Register a user with a real Argon2 hash and return the user id
pub async fn create_test_user(app_data: &AppData, username: &str, password: &str) -> i32 {
    let password_hash = app_data
        .providers
        .crypto_provider
        .hash_password(password.to_string())
        .await
        .expect("Failed to hash password");

    app_data
        .credential_store
        .add_user(NewUser {
            username: username.to_string(),
            password_hash,
            profile: sample_profile(username, "Resident"),
        })
        .await
        .expect("Failed to create test user")
}
