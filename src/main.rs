//! Warden Server: authentication and role-based access control backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use warden_auth::password::CredentialStore;
use warden_core::config::AppConfig;
use warden_core::error::AppError;
use warden_core::traits::SystemClock;
use warden_database::{DatabasePool, MemoryStore, Repositories};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("WARDEN_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Warden");

    // ── Step 1: Storage ──────────────────────────────────────────
    let (database, repos) = if config.database.is_configured() {
        let database = DatabasePool::connect(&config.database).await?;
        tracing::info!("Running database migrations...");
        database.migrate().await?;
        tracing::info!("Database migrations complete");
        let repos = Repositories::postgres(database.pool().clone());
        (Some(database), repos)
    } else {
        tracing::warn!("database.url is not set; using the in-memory store, data will not persist");
        (None, Repositories::memory(MemoryStore::seeded()))
    };

    // ── Step 2: First-run admin account ──────────────────────────
    let credentials = CredentialStore::new(&config.auth)?;
    if let Some(admin) =
        warden_service::bootstrap::ensure_admin(&config.bootstrap, &repos, &credentials).await?
    {
        tracing::info!(user_id = %admin.id, email = %admin.email, "Bootstrap admin created");
    }

    // ── Step 3: Serve ────────────────────────────────────────────
    let state = warden_api::AppState::new(config, database.clone(), repos, Arc::new(SystemClock))?;
    warden_api::run_server(state).await?;

    if let Some(database) = database {
        database.close().await;
    }

    tracing::info!("Warden server shut down gracefully");
    Ok(())
}
