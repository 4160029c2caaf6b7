//! Products API - REST server over PostgreSQL

use axum_helpers::server::{create_production_app, create_router, health_router};
use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{DatabaseConnection, connect_with_retry, reset_schema, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[derive(Parser)]
#[command(name = "products-api")]
#[command(about = "Product catalogue REST API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and serve the API (default)
    Serve,

    /// Drop and recreate every table, then exit
    Clear,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to database...");
    let db = connect_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(AppState { config, db }).await,
        Commands::Clear => clear(db).await,
    }
}

async fn serve(state: AppState) -> eyre::Result<()> {
    run_migrations::<Migrator>(&state.db, state.config.app.name).await?;

    let router = create_router::<openapi::ApiDoc>(api::routes(&state), &state.config.cors);
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.db.clone()));

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            if let Err(e) = db.close().await {
                tracing::warn!("Failed to close database pool: {}", e);
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}

async fn clear(db: DatabaseConnection) -> eyre::Result<()> {
    reset_schema::<Migrator>(&db).await?;
    db.close().await?;
    info!("All product data removed");
    Ok(())
}
