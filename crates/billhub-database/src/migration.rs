//! Embedded schema for the client listing tables.
//!
//! Migrations live in the workspace `migrations/` directory and create
//! `companies`, `clients` and `client_contacts`, in that order.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{debug, info};

use billhub_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the billing schema up to date.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let latest = MIGRATOR.iter().map(|m| m.version).max().unwrap_or_default();
    info!(
        migrations = MIGRATOR.iter().count(),
        latest, "Applying billing schema migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to apply billing schema migrations: {e}"),
            e,
        )
    })?;

    for migration in MIGRATOR.iter() {
        debug!(version = migration.version, description = %migration.description, "Schema migration present");
    }
    info!(latest, "Billing schema is current");
    Ok(())
}
