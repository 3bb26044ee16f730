//! Route definitions

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api_v1_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API v1 routes
fn api_v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Preset administration
        .route(
            "/presets",
            get(handlers::list_presets).post(handlers::create_preset),
        )
        .route(
            "/presets/:id",
            put(handlers::update_preset).delete(handlers::delete_preset),
        )
        // Ledger mutation
        .route("/ledger/grant", post(handlers::grant))
        .route("/ledger/decrement", post(handlers::decrement))
        // Redemption
        .route("/exchange", post(handlers::exchange))
        .route("/claims/batch", post(handlers::batch_claim))
        // Aggregated fragment view & audit history
        .route("/fragments/:user_id", get(handlers::get_fragments))
        .route("/journal/:user_id", get(handlers::get_journal))
}
