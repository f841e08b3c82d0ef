#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_with_config;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> Option<configs::DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let mut cfg = configs::AppConfig::load().ok()?.database;
    cfg.min_connections = 1;
    cfg.connect_timeout_secs = 5;
    cfg.acquire_timeout_secs = 5;
    cfg.validate().ok()?;
    Some(cfg)
}

/// A migrated connection, or `None` when no database is configured or reachable.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    let Some(cfg) = test_config() else { return Ok(None) };

    // Run migrations exactly once, with a throwaway connection
    let ready = *MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&cfg).await {
                Ok(db) => match migration::Migrator::up(&db, None).await {
                    Ok(()) => true,
                    Err(e) => {
                        eprintln!("skip: migrate up failed: {}", e);
                        false
                    }
                },
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    false
                }
            }
        })
        .await;
    if !ready {
        return Ok(None);
    }

    // Return a fresh connection for the current test's runtime
    let db = connect_with_config(&cfg).await?;
    Ok(Some(db))
}
