// CLI module for maintenance operations run against the database

pub mod admin;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// Society backend server and maintenance CLI
#[derive(Parser, Debug)]
#[command(name = "society-backend")]
#[command(about = "Residential society management backend", long_about = None)]
pub struct Cli {
    /// Runs the HTTP server when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run pending database migrations and exit
    Migrate,

    /// Add an amenity to the catalogue
    AddAmenity {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Add a flat to the catalogue
    AddFlat {
        #[arg(long)]
        number: String,
        #[arg(long)]
        wing: Option<String>,
    },

    /// Add a parking slot to the catalogue
    AddParking {
        #[arg(long)]
        number: String,
    },

    /// Grant an existing role to a user
    GrantRole {
        #[arg(long)]
        username: String,
        #[arg(long)]
        role: String,
    },

    /// Revoke a role from a user
    RevokeRole {
        #[arg(long)]
        username: String,
        #[arg(long)]
        role: String,
    },

    /// Allow a user to log on
    Enable {
        #[arg(long)]
        username: String,
    },

    /// Block a user from logging on
    Disable {
        #[arg(long)]
        username: String,
    },
}

/// Execute CLI command
///
/// Migrations have already run by the time a command executes, so
/// `migrate` only reports success.
pub async fn execute_command(
    command: Commands,
    app_data: Arc<AppData>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Migrate => {
            println!("Database is up to date.");
        }
        Commands::AddAmenity { name, description } => {
            admin::add_amenity(app_data, &name, description).await?;
        }
        Commands::AddFlat { number, wing } => {
            admin::add_flat(app_data, &number, wing).await?;
        }
        Commands::AddParking { number } => {
            admin::add_parking(app_data, &number).await?;
        }
        Commands::GrantRole { username, role } => {
            admin::grant_role(app_data, &username, &role).await?;
        }
        Commands::RevokeRole { username, role } => {
            admin::revoke_role(app_data, &username, &role).await?;
        }
        Commands::Enable { username } => {
            admin::set_authorised(app_data, &username, true).await?;
        }
        Commands::Disable { username } => {
            admin::set_authorised(app_data, &username, false).await?;
        }
    }

    Ok(())
}
