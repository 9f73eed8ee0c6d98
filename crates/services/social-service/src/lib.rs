//! Social Service Library
//!
//! Users and their posts over a relational store, exposed as a JSON HTTP API.
//! The `repository` module is the storage layer; `api` is a thin HTTP shell
//! over it.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;

use std::sync::Arc;

use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::infra::Database;
use crate::repository::Storage;

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Connect and migrate
    let database = Arc::new(Database::connect(&config.database).await?);
    let storage = Storage::from_connection(database.get_connection());

    let state = AppState::new(storage, database.clone(), &config);
    let app = create_router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Social service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await?;
    info!("Database pool closed");

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    action: MigrateAction,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, marker);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running migrations");
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    db.close().await?;
    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, draining connections"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
