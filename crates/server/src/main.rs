use server::clients;
use server::config;
use server::db;
use server::routes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    // Connect to Postgres
    tracing::info!("Connecting to database...");
    let pool = db::pool::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run schema migrations
    tracing::info!("Running migrations...");
    db::pool::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    // Object storage for admin uploads (optional)
    let storage = clients::storage::AssetStorage::new(&config);
    if storage.is_some() {
        tracing::info!("Asset storage configured");
    } else {
        tracing::info!("Asset storage not configured - uploads disabled");
    }

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Public pages
        .route("/api/matches", get(routes::matches::list_matches))
        .route("/api/matches/{match_id}", get(routes::matches::get_match))
        .route("/api/groups", get(routes::groups::get_groups))
        .route("/api/teams", get(routes::teams::list_teams))
        .route("/api/teams/{team_id}", get(routes::teams::get_team))
        .route("/api/settings", get(routes::settings::get_settings))
        // Admin
        .route("/api/admin/login", post(routes::admin::login))
        .route("/api/admin/session", get(routes::admin::session))
        .route("/api/admin/settings", put(routes::settings::update_settings))
        .route("/api/admin/matches/{match_id}", put(routes::admin::update_match))
        .route("/api/admin/matches/{match_id}/lineup", put(routes::admin::update_lineup))
        .route("/api/admin/matches/{match_id}/events", post(routes::admin::add_event))
        .route("/api/admin/assets", post(routes::admin::upload_asset))
        // Shared state
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(Extension(pool))
        .layer(Extension(config.clone()))
        .layer(Extension(storage))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
