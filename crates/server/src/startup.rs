use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::book::{BookService, SeaOrmBookRepository};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load and validate config.toml, falling back to environment variables
fn load_config() -> Result<configs::AppConfig, StartupError> {
    configs::AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, draining connections");
}

/// Public entry: connect storage, create the schema, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = load_config()?;

    // Pooled connection shared by all handlers
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Bootstrap(e.to_string()))?;
    models::db::ping(&db).await.map_err(|e| StartupError::Bootstrap(e.to_string()))?;

    // Creates the books table and its unique index on first start
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Bootstrap(e.to_string()))?;
    info!("books schema ready");

    let repo = SeaOrmBookRepository { db };
    let state = ServerState { books: BookService::new(Arc::new(repo)) };

    let app: Router = routes::build_router(state, build_cors());

    // host may be a name such as "localhost", so bind resolves it
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "starting book service");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
