use std::sync::Arc;

use actix_web::HttpServer;
use anyhow::Context;

use notifier_api::{create_app, telemetry::init_tracing, AppState};
use notifier_core::{BcryptPasswordHasher, TokenService};
use notifier_infra::database::{
    run_migrations, DatabasePool, MySqlStudentRepository, MySqlSubTaskRepository, MySqlTaskRepository,
};
use notifier_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);
    config.validate().context("Invalid configuration")?;

    tracing::info!(environment = %config.environment, "Starting notifier API server");

    let tokens = Arc::new(TokenService::new((&config.auth.jwt).into()));
    let hasher = Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost));

    let mut database = None;
    let state = if std::env::var("DATABASE_URL").is_ok() {
        let db = DatabasePool::new(&config.database)
            .await
            .context("Failed to connect to the database")?;
        run_migrations(db.get_pool())
            .await
            .context("Failed to apply migrations")?;

        if !db.health_check().await.context("Database health check failed")? {
            anyhow::bail!("Database health check returned an unexpected value");
        }
        tracing::info!(pool = %db.get_statistics(), "Database ready");

        let pool = db.get_pool().clone();
        let state = AppState::new(
            Arc::new(MySqlStudentRepository::new(pool.clone())),
            Arc::new(MySqlTaskRepository::new(pool.clone())),
            Arc::new(MySqlSubTaskRepository::new(pool)),
            hasher,
            tokens,
        );
        database = Some(db);
        state
    } else {
        tracing::warn!("DATABASE_URL not set; data is kept in memory and lost on restart");
        AppState::in_memory(hasher, tokens)
    };

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(db) = database {
        db.close().await;
    }

    Ok(())
}
