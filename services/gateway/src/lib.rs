use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod fathom;
pub mod handlers;
pub mod notemaker;

use config::Config;
use fathom::FathomClient;
use notemaker::NotemakerClient;

#[derive(Clone)]
pub struct AppState {
    pub fathom: Arc<FathomClient>,
    pub notemaker: Arc<NotemakerClient>,
}

/// Build the gateway router. Upstream clients are constructed once from the
/// startup configuration and shared across requests.
pub fn create_app(config: Config) -> Router {
    let state = AppState {
        fathom: Arc::new(FathomClient::new(config.fathom)),
        notemaker: Arc::new(NotemakerClient::new(config.notemaker)),
    };

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/meetings", get(handlers::meetings::list_meetings))
        .route("/api/transcript", get(handlers::transcript::get_transcript))
        .route("/api/notes", post(handlers::notes::generate_notes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
