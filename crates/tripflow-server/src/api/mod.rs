pub mod chat;
pub mod error;
pub mod state;

pub use state::AppState;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        // Chat relay
        .route("/api/chat", post(chat::relay_chat))
        .fallback(crate::static_assets::static_handler)
        .layer(cors)
        .with_state(state)
}

#[derive(serde::Serialize)]
struct Health {
    status: String,
}

async fn health() -> axum::Json<Health> {
    axum::Json(Health {
        status: "tripflow is working!".to_string(),
    })
}
