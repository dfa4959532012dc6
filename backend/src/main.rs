use axum::http::{HeaderValue, Method};
use lunchbot::{
    db::{PgBlobStore, PgUserDirectory},
    get_db_pool, handlers, utils, Config, PairingEngine,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging();

    let config = Config::from_env()?;
    let db_config = lunchbot::db::DatabaseConfig::from_env()?;
    let pool = get_db_pool(&db_config).await?;

    // Run migrations
    lunchbot::db::migrations::run_migrations(&pool).await?;

    let engine = PairingEngine::from_config(
        Arc::new(PgBlobStore::new(pool.clone())),
        Arc::new(PgUserDirectory::new(pool)),
        &config,
    );

    let port = config.port;
    let app = handlers::router(Arc::new(engine)).layer(create_cors_layer(&config));

    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Server running on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn create_cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        // Default to permissive for development
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}
