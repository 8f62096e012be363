use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use astrodesk::cache::SnapshotCache;
use astrodesk::config::AppConfig;
use astrodesk::handlers;
use astrodesk::services::upstream::AstrobartaClient;
use astrodesk::services::watermark::FileWatermark;
use astrodesk::services::workflow::DialogRegistry;
use astrodesk::state::{AppState, Selections};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(!config.api_key.is_empty(), "BOOKING_API_KEY must be set");

    tracing::info!("using booking API at {}", config.api_base_url);
    let api = AstrobartaClient::new(config.api_base_url.clone(), config.api_key.clone());
    let watermark = FileWatermark::new(config.watermark_path.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        api: Box::new(api),
        cache: SnapshotCache::new(Duration::from_secs(config.revalidate_secs)),
        selections: Mutex::new(Selections::default()),
        dialogs: DialogRegistry::new(),
        watermark: Box::new(watermark),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/dashboard", get(handlers::dashboard::dashboard))
        .route(
            "/api/notifications",
            get(handlers::dashboard::notifications),
        )
        .route(
            "/api/notifications/seen",
            post(handlers::dashboard::mark_notifications_seen),
        )
        .route(
            "/api/astrologers",
            get(handlers::astrologers::list_astrologers),
        )
        .route(
            "/api/astrologers",
            post(handlers::astrologers::create_astrologer),
        )
        .route(
            "/api/astrologers/export.csv",
            get(handlers::astrologers::export_astrologers),
        )
        .route(
            "/api/astrologers/:id",
            post(handlers::astrologers::update_astrologer),
        )
        .route("/api/expertise", get(handlers::astrologers::list_expertise))
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route(
            "/api/bookings/export.csv",
            get(handlers::bookings::export_bookings),
        )
        .route(
            "/api/bookings/:id/status",
            post(handlers::bookings::update_booking_status),
        )
        .route(
            "/api/call-requests",
            get(handlers::call_requests::list_call_requests),
        )
        .route(
            "/api/call-requests/export.csv",
            get(handlers::call_requests::export_call_requests),
        )
        .route(
            "/api/call-requests/:id/status",
            post(handlers::call_requests::update_call_request_status),
        )
        // Profile images may run to 5MB; leave headroom over the default cap.
        .layer(DefaultBodyLimit::max(6 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
