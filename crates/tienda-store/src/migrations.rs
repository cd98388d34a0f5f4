//! # Embedded Migrations
//!
//! SQL files under `migrations/sqlite/` are compiled into the binary by
//! `sqlx::migrate!` and applied in filename order when a `SqliteStorage` opens.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_local_storage.sql   # key / value / updated_at slots
//! ```
//!
//! Never edit an applied migration; add the next `NNN_description.sql`.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::{StoreError, StoreResult};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations/sqlite");

/// Applies every pending migration. Safe to run repeatedly.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    info!("Checking for pending migrations");
    MIGRATOR.run(pool).await?;
    info!("All migrations applied");
    Ok(())
}

/// Returns `(embedded, applied)` migration counts.
///
/// Fails if the migrations table cannot be read, e.g. before the first run.
pub async fn migration_status(pool: &SqlitePool) -> StoreResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;
    let applied = usize::try_from(applied)
        .map_err(|_| StoreError::Internal(format!("negative migration count {}", applied)))?;

    Ok((total, applied))
}
