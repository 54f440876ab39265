use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use crate::models::AppState;

use super::helpers::message_page;

pub async fn root_get(State(state): State<AppState>) -> Response {
    match &state.settings.store_slug {
        Some(slug) => Redirect::to(&format!("/store/{}", slug)).into_response(),
        None => message_page(
            &state,
            StatusCode::OK,
            "Data Bundles",
            "No default store is configured. Open /store/<name> to visit a store.",
        ),
    }
}

pub async fn health_get() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
