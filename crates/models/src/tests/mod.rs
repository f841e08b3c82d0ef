

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Connect and migrate, or `None` when no database is available for this run.
pub(crate) async fn setup_test_db() -> Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let db = match crate::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return Ok(None);
        }
    };
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}
