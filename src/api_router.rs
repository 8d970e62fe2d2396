//! Combines the quiz and content-generation endpoints into one router.

use axum::{
    http::{header, Method},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::shared::state::AppState;

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

pub fn configure_api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(crate::learn::configure_learn_routes())
        .merge(crate::llm::configure_ai_routes())
}

/// Builds the complete application with middleware and state attached.
pub fn build_router(state: Arc<AppState>) -> Router {
    configure_api_routes()
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
