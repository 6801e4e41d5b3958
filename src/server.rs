//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, dependency wiring, and the Axum server
//! lifecycle including graceful shutdown.

use crate::application::services::{AuthService, PasswordEncoder, UserService};
use crate::config::{Config, DatabaseConfig};
use crate::domain::repositories::UserRepository;
use crate::infrastructure::persistence::PgUserRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Opens the connection pool sized from the `database` section.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the database is
/// unreachable.
pub async fn connect_pool(database: &DatabaseConfig) -> Result<PgPool> {
    let url = database.connection_url()?;

    PgPoolOptions::new()
        .max_connections(database.max_open_connections)
        .min_connections(database.max_idle_connections)
        .acquire_timeout(Duration::from_secs(database.acquire_timeout_seconds))
        .connect(&url)
        .await
        .context("Failed to connect to database")
}

/// Builds the repository and services on top of `pool`.
pub fn build_state(pool: PgPool, config: &Config) -> AppState {
    let repository: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(Arc::new(pool)));
    let auth_service = Arc::new(AuthService::new(
        &config.security.token_secret,
        config.security.token_ttl_seconds,
    ));
    let user_service = Arc::new(UserService::new(
        repository,
        auth_service.clone(),
        PasswordEncoder::new(config.security.legacy_salt.as_str()),
        config.security.default_password.as_str(),
    ));

    AppState::new(user_service, auth_service)
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config.database).await?;
    tracing::info!("Connected to database");

    if config.database.auto_migrate {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to apply migrations")?;
        tracing::info!("Migrations applied");
    }

    let state = build_state(pool.clone(), &config);
    let app = app_router(state, &config.server);

    let addr = config.server.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(app = %config.app.name, "Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
