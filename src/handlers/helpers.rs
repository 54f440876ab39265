use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::models::AppState;
use crate::templates::MessageTemplate;

pub fn render_template<T: askama::Template>(status: StatusCode, t: T) -> Response {
    match t.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub fn message_page(state: &AppState, status: StatusCode, title: &str, message: &str) -> Response {
    render_template(
        status,
        MessageTemplate {
            api_hostname: state.api_hostname(),
            title: title.to_string(),
            message: message.to_string(),
        },
    )
}
