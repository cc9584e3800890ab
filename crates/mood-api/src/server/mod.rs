//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::Utc;
use mood_cache::DailyRateLimiter;
use mood_common::{AppConfig, AppError};
use mood_db::{create_pool, JsonFileStore, PgMoodRepository, PoolConfig};
use mood_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// How often stale rate-limit entries are dropped
const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
///
/// The pool connects lazily, so the server starts even when the database is
/// down; submissions then land in the fallback file.
pub fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let pool = create_pool(&PoolConfig::from(&config.database))
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!(
        max_connections = config.database.max_connections,
        "PostgreSQL pool configured"
    );

    let mood_repo = Arc::new(PgMoodRepository::new(pool));
    let fallback_store = Arc::new(JsonFileStore::new(&config.storage.fallback_file));
    let rate_limiter = DailyRateLimiter::from(&config.rate_limit);
    info!(
        fallback_file = %config.storage.fallback_file,
        daily_limit = rate_limiter.limit(),
        "Storage configured"
    );

    let service_context = ServiceContextBuilder::new()
        .mood_repo(mood_repo)
        .fallback_store(fallback_store)
        .rate_limiter(rate_limiter)
        .storage_timeout(Duration::from_secs(config.database.query_timeout_secs.max(1)))
        .fallback_location(config.storage.fallback_file.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Periodically drop limiter entries from previous days
pub fn spawn_rate_limit_purge(limiter: DailyRateLimiter) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = limiter.purge_stale(Utc::now().date_naive());
            if removed > 0 {
                debug!(removed, remaining = limiter.len(), "Purged stale rate limit entries");
            }
        }
    })
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config)?;
    let purge = spawn_rate_limit_purge(state.service_context().rate_limiter().clone());

    let result = run_server(create_app(state), addr).await;
    purge.abort();
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}
