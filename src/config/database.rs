use sea_orm::{Database, DatabaseConnection};
use migration::{Migrator, MigratorTrait};
use crate::{config::BootstrapSettings, errors::InternalError};

/// Shared database handles
#[derive(Clone, Debug)]
pub struct DatabaseConnections {
    pub db: DatabaseConnection,
}

impl DatabaseConnections {
    /// Connect using the configured `DATABASE_URL`
    ///
    /// Does NOT run migrations - call [`DatabaseConnections::migrate`] separately.
    pub async fn init(bootstrap_settings: &BootstrapSettings) -> Result<Self, InternalError> {
        Self::connect(bootstrap_settings.database_url()).await
    }

    pub async fn connect(database_url: &str) -> Result<Self, InternalError> {
        let db = Database::connect(database_url)
            .await
            .map_err(|e| InternalError::database("connect_database", e))?;

        tracing::debug!("Connected to database: {}", database_url);

        Ok(Self { db })
    }

    /// Run all pending migrations
    pub async fn migrate(&self) -> Result<(), InternalError> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| InternalError::database("run_migrations", e))?;

        tracing::debug!("Database migrations completed");

        Ok(())
    }
}
