use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::api::{load_agent_store, store_purchase};
use crate::bulk::is_valid_capacity;
use crate::error::{ApiError, ValidationError};
use crate::models::AppState;
use crate::network::Network;
use crate::phone::{format_phone_for_display, Msisdn};
use crate::store::{AgentStore, StoreView};
use crate::templates::StorePageTemplate;
use crate::utils::parse_float_prefix;

use super::helpers::{message_page, render_template};

#[derive(Debug, Deserialize)]
pub struct StoreQuery {
    pub network: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BuyForm {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub capacity: String,
}

/// Banner shown above the product cards after a purchase attempt.
struct Banner {
    is_error: bool,
    text: String,
}

fn render_store(
    state: &AppState,
    store: &AgentStore,
    network: Option<&str>,
    banner: Option<Banner>,
    phone_value: String,
) -> Response {
    let view = StoreView::build(&store.products, network);
    let (has_banner, banner_is_error, banner_text) = match banner {
        Some(b) => (true, b.is_error, b.text),
        None => (false, false, String::new()),
    };
    render_template(
        StatusCode::OK,
        StorePageTemplate {
            api_hostname: state.api_hostname(),
            store_name: store.display_name().to_string(),
            slug: store.slug.clone(),
            tabs: &view.tabs,
            cards: &view.cards,
            selected_network: view.selected.clone().unwrap_or_default(),
            has_products: !view.is_empty(),
            has_banner,
            banner_is_error,
            banner_text,
            phone_value,
        },
    )
}

async fn fetch_store(state: &AppState, slug: &str) -> Result<AgentStore, Response> {
    match load_agent_store(&state.client, slug).await {
        Ok(store) => Ok(store),
        Err(ApiError::Server { status: 404, .. } | ApiError::Invalid(_)) => {
            Err(message_page(state, StatusCode::NOT_FOUND, "Store not found", "There is no store at this address."))
        }
        Err(e) => {
            tracing::error!(slug, error = %e, "Failed to load store");
            Err(message_page(state, StatusCode::BAD_GATEWAY, "Store unavailable", &e.user_message()))
        }
    }
}

pub async fn store_get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(q): Query<StoreQuery>,
) -> impl IntoResponse {
    let store = match fetch_store(&state, &slug).await {
        Ok(s) => s,
        Err(r) => return r,
    };
    render_store(&state, &store, q.network.as_deref(), None, String::new())
}

fn validate_form(form: &BuyForm) -> Result<(Msisdn, Network, f64), ValidationError> {
    let phone = Msisdn::parse(&form.phone)?;
    let network: Network = form.network.parse()?;
    let capacity = parse_float_prefix(&form.capacity);
    if !is_valid_capacity(capacity) {
        return Err(ValidationError::InvalidCapacity(form.capacity.trim().to_string()));
    }
    Ok((phone, network, capacity))
}

pub async fn store_buy_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<BuyForm>,
) -> impl IntoResponse {
    let store = match fetch_store(&state, &slug).await {
        Ok(s) => s,
        Err(r) => return r,
    };
    let network_key = form.network.trim().to_string();
    let phone_value = format_phone_for_display(&form.phone);

    let (phone, network, capacity) = match validate_form(&form) {
        Ok(v) => v,
        Err(e) => {
            let banner = Banner { is_error: true, text: e.to_string() };
            return render_store(&state, &store, Some(&network_key), Some(banner), phone_value);
        }
    };

    match store_purchase(&state.client, &slug, phone.as_str(), network, capacity).await {
        Ok(resp) => {
            if let Some(url) = resp.data.authorization_url {
                return Redirect::to(&url).into_response();
            }
            let text = resp.message.unwrap_or_else(|| "Purchase successful".to_string());
            tracing::info!(slug = %slug, phone = %phone, %network, capacity, "Store purchase accepted");
            render_store(&state, &store, Some(&network_key), Some(Banner { is_error: false, text }), String::new())
        }
        Err(e) => {
            if !e.is_server_error() {
                tracing::error!(slug = %slug, error = %e, "Store purchase failed");
            }
            let banner = Banner { is_error: true, text: e.user_message() };
            render_store(&state, &store, Some(&network_key), Some(banner), phone_value)
        }
    }
}
