use std::sync::Arc;

use blog_api::config::AppConfig;
use blog_api::migration::Migrator;
use blog_api::{AppState, build_app};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Arc::new(AppConfig::from_env());
    let default_filter = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()))
        .init();

    tracing::info!(
        bind = %config.bind_addr,
        debug = config.debug,
        language = %config.language_code,
        time_zone = %config.time_zone,
        "starting blog service"
    );

    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    tokio::fs::create_dir_all(&config.media_root).await?;
    tokio::fs::create_dir_all(&config.static_root).await?;

    let bind_addr = config.bind_addr.clone();
    let app = build_app(AppState { db, config });

    poem::Server::new(poem::listener::TcpListener::bind(bind_addr))
        .run(app)
        .await?;
    Ok(())
}
