//! ClassHub authentication server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use classhub_auth::password::PasswordHasher;
use classhub_auth::session::{SessionCleanup, SessionManager};
use classhub_auth::store::{IdentityStore, SessionStore};
use classhub_auth::strategy::Authenticator;
use classhub_core::config::AppConfig;
use classhub_core::error::AppError;
use classhub_database::DatabasePool;
use classhub_database::repositories::{SessionRepository, UserRepository};

#[tokio::main]
async fn main() {
    let env = std::env::var("CLASSHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
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
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ClassHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    classhub_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = UserRepository::new(db.pool().clone());
    let session_repo = SessionRepository::new(db.pool().clone());

    // The session table is created on first use so the service can point
    // at any database without a separate provisioning step.
    session_repo.ensure_table().await?;

    let identity_store: Arc<dyn IdentityStore> = Arc::new(user_repo);
    let session_store: Arc<dyn SessionStore> = Arc::new(session_repo);

    // ── Step 3: Auth services ────────────────────────────────────
    let hasher = Arc::new(PasswordHasher::new());
    let authenticator = Arc::new(Authenticator::new(
        Arc::clone(&identity_store),
        Arc::clone(&hasher),
    ));
    let sessions = Arc::new(SessionManager::new(
        Arc::clone(&session_store),
        config.session.clone(),
    ));

    // ── Step 4: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 5: Session cleanup reaper ───────────────────────────
    let cleanup = SessionCleanup::new(Arc::clone(&session_store));
    let cleanup_interval = Duration::from_secs(config.session.cleanup_interval_minutes * 60);
    let mut cleanup_shutdown = shutdown_rx;

    let cleanup_handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(cleanup_interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = cleanup.run_cleanup().await {
                        tracing::error!(error = %e, "Session cleanup failed");
                    }
                }
                _ = cleanup_shutdown.changed() => break,
            }
        }
    });

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app_state = classhub_api::state::AppState {
        config: Arc::new(config.clone()),
        authenticator,
        sessions,
    };

    let app = classhub_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ClassHub server listening on {addr}");

    // ── Step 7: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 8: Wait for background tasks ────────────────────────
    let _ = tokio::time::timeout(Duration::from_secs(10), cleanup_handle).await;

    db.close().await;
    tracing::info!("ClassHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
