use std::process;
use std::sync::Arc;

use clap::Parser;
use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;

use society_backend::AppData;
use society_backend::api::{AmenitiesApi, DataApi, HealthApi, UsersApi};
use society_backend::cli::{self, Cli};
use society_backend::config::{BootstrapSettings, DatabaseConnections, SecretManager, init_logging};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let cli = Cli::parse();

    let settings = match BootstrapSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };
    tracing::debug!("Loaded settings: {:?}", settings);

    let secret_manager = match SecretManager::init() {
        Ok(secret_manager) => Arc::new(secret_manager),
        Err(e) => {
            tracing::error!("Failed to load secrets: {}", e);
            process::exit(1);
        }
    };

    let connections = match DatabaseConnections::init(&settings).await {
        Ok(connections) => connections,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = connections.migrate().await {
        tracing::error!("Failed to run migrations: {}", e);
        process::exit(1);
    }
    tracing::info!("Database migrations completed");

    let app_data = Arc::new(AppData::init(connections, &settings, secret_manager));

    if let Some(command) = cli.command {
        if let Err(e) = cli::execute_command(command, app_data).await {
            tracing::error!("Command failed: {}", e);
            process::exit(1);
        }
        return Ok(());
    }

    let server_address = settings.server_address();
    let api_service = OpenApiService::new(
        (
            HealthApi,
            UsersApi::new(app_data.clone()),
            AmenitiesApi::new(app_data.clone()),
            DataApi::new(app_data),
        ),
        "Society Management API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", server_address));

    let swagger_ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", swagger_ui);

    tracing::info!("Starting server on http://{}", server_address);
    tracing::info!("Swagger UI available at http://{}/swagger", server_address);

    Server::new(TcpListener::bind(server_address)).run(app).await
}
