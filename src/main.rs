use std::sync::{Arc, Mutex};

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use trainerbook::config::AppConfig;
use trainerbook::db;
use trainerbook::handlers;
use trainerbook::services::notifications::push::HttpPushProvider;
use trainerbook::services::store::SqliteStore;
use trainerbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let db = Arc::new(Mutex::new(conn));

    if config.push_endpoint.is_empty() {
        tracing::warn!("PUSH_ENDPOINT not set, notifications will be skipped");
    }
    let notifier = HttpPushProvider::new(config.push_endpoint.clone(), config.push_api_key.clone());

    let state = Arc::new(AppState {
        db: Arc::clone(&db),
        config: config.clone(),
        store: Arc::new(SqliteStore::new(db)),
        notifier: Box::new(notifier),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/trainers/:id/calendar",
            get(handlers::calendar::get_calendar),
        )
        .route(
            "/api/trainers/:id/availability",
            get(handlers::calendar::get_availability),
        )
        .route(
            "/api/trainers/:id/availability",
            post(handlers::calendar::upsert_availability),
        )
        .route(
            "/api/trainers/:id/blocked-weekdays",
            get(handlers::calendar::get_blocked_weekdays),
        )
        .route(
            "/api/trainers/:id/blocked-weekdays",
            put(handlers::calendar::set_blocked_weekdays),
        )
        .route("/api/admin/trainers", get(handlers::admin::get_trainers))
        .route("/api/admin/trainers", post(handlers::admin::create_trainer))
        .route("/api/admin/bookings", get(handlers::admin::get_bookings))
        .route("/api/admin/bookings", post(handlers::admin::create_booking))
        .route(
            "/api/admin/bookings/:id/status",
            post(handlers::admin::update_booking_status),
        )
        .route(
            "/api/admin/bookings/:id/promote",
            post(handlers::admin::promote_booking),
        )
        .route("/api/admin/events", get(handlers::admin::get_events))
        .route("/api/admin/events", post(handlers::admin::create_event))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
