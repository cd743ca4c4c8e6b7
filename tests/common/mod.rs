// Common test utilities for integration tests

use std::collections::HashMap;
use std::sync::Arc;

use society_backend::AppData;
use society_backend::config::{BootstrapSettings, DatabaseConnections, EnvironmentProvider, SecretManager};

pub const TEST_JWT_SECRET: &str = "integration-jwt-secret-with-32-characters";
pub const TEST_PEPPER: &str = "integration-pepper-16";

/// Fixed set of variables standing in for the process environment
#[derive(Default)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    pub fn new(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    /// Minimal environment for a working in-memory deployment
    pub fn with_secrets() -> Self {
        Self::new(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", TEST_JWT_SECRET),
            ("PASSWORD_PEPPER", TEST_PEPPER),
        ])
    }
}

impl EnvironmentProvider for StaticEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Boot the application the way main does, over an in-memory database
pub async fn setup_app_data() -> Arc<AppData> {
    let env = Arc::new(StaticEnvironment::with_secrets());
    let settings = BootstrapSettings::from_env_provider(env.clone()).expect("Failed to load settings");
    let secret_manager = Arc::new(SecretManager::from_env_provider(env.as_ref()).expect("Failed to load secrets"));

    let connections = DatabaseConnections::init(&settings)
        .await
        .expect("Failed to connect to test database");
    connections.migrate().await.expect("Failed to run migrations");

    Arc::new(AppData::init(connections, &settings, secret_manager))
}
