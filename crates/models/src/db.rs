use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use tracing::info;

/// Build pool options from the `[database]` config section.
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

/// Open the connection pool described by `cfg`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg)).await?;
    info!(
        max_connections = cfg.max_connections,
        min_connections = cfg.min_connections,
        "database pool established"
    );
    Ok(db)
}

/// Connect using `config.toml` / environment, the same resolution the server uses.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let cfg = configs::AppConfig::load()?;
    connect_with_config(&cfg.database).await
}

/// Round-trip a trivial query to verify the pool is usable.
pub async fn ping(db: &DatabaseConnection) -> anyhow::Result<()> {
    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_string());
    db.query_one(stmt).await?;
    Ok(())
}
