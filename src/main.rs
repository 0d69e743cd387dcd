use std::sync::Arc;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::EnvFilter;

use pawhaven::api;
use pawhaven::config::Config;
use pawhaven::migrations::Migrator;
use pawhaven::state::{AppState, default_filter_registry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = Database::connect(config.database_url()).await?;
    tracing::info!("database connection established");
    Migrator::up(&db, None).await?;

    // Whitelist population must complete before the listener starts.
    let registry = default_filter_registry();

    let addr = format!("0.0.0.0:{}", config.listen_port);
    let state = AppState::new(db, Arc::new(config), Arc::new(registry));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
