use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_get))
        .route("/health", get(handlers::health_get))
        .route("/store/:slug", get(handlers::store_get))
        .route("/store/:slug/buy", post(handlers::store_buy_post))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
