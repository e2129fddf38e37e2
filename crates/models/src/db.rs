//! Connection pool construction.
//!
//! Every handler borrows a pooled connection per statement; nothing holds a
//! long-lived cursor across requests.

use std::time::Duration;

use configs::{AppConfig, DatabaseConfig};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

use crate::errors::ModelError;

/// Connect using `config.toml` / environment settings.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    // Load .env if present
    let _ = dotenvy::dotenv();
    let cfg = AppConfig::load_and_validate()?;
    let db = connect_with_config(&cfg.database).await?;
    Ok(db)
}

pub fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    opt
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let db = Database::connect(connect_options(cfg)).await?;
    info!(
        max_connections = cfg.max_connections,
        min_connections = cfg.min_connections,
        "database pool ready"
    );
    Ok(db)
}

/// Round-trip a trivial query; used by startup to fail fast.
pub async fn ping(db: &DatabaseConnection) -> Result<(), ModelError> {
    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    db.execute(stmt).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_carry_pool_settings() {
        let cfg = DatabaseConfig {
            url: "postgres://postgres@localhost:5432/restapi".into(),
            max_connections: 7,
            min_connections: 3,
            acquire_timeout_secs: 9,
            ..Default::default()
        };
        let opt = connect_options(&cfg);
        assert_eq!(opt.get_url(), "postgres://postgres@localhost:5432/restapi");
        assert_eq!(opt.get_max_connections(), Some(7));
        assert_eq!(opt.get_min_connections(), Some(3));
        assert_eq!(opt.get_acquire_timeout(), Some(Duration::from_secs(9)));
        assert!(!opt.get_sqlx_logging());
    }
}
