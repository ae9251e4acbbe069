//! Schema creation for the students, tasks and subtasks tables.

use sqlx::MySqlPool;

use crate::InfrastructureError;

/// Apply pending migrations from `infra/migrations`
///
/// Applied versions are recorded by SQLx, so this runs on each startup.
pub async fn run_migrations(pool: &MySqlPool) -> Result<(), InfrastructureError> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        tracing::error!(error = %e, "Database migration failed");
        InfrastructureError::Migration(e.to_string())
    })?;

    tracing::info!("Database migrations completed");
    Ok(())
}
