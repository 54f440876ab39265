use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Settings;
use crate::error::ApiError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        eprintln!("{}", msg);
    }
}

/// Response envelope every backend endpoint uses.
#[derive(Debug, Clone, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// A successful response with its typed payload.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: Option<String>,
}

/// Request body, kept as JSON for logging.
enum Body {
    None,
    Json(Value),
    Multipart(Form, String),
}

/// HTTP client for the reseller backend.
///
/// Owns the base URL and bearer token so call sites never touch either.
/// Every response is unwrapped from the `{success, data, message}`
/// envelope: `success: false` and non-2xx statuses become
/// [`ApiError::Server`] carrying the server's message.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("Cletech/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.api_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_http(http, &settings.api_base_url, &settings.api_token))
    }

    pub fn with_http(http: reqwest::Client, base_url: &str, token: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send(Method::GET, endpoint, params, Body::None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send(Method::POST, endpoint, &[], Body::Json(to_json(body)?)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send(Method::PUT, endpoint, &[], Body::Json(to_json(body)?)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<ApiResponse<T>, ApiError> {
        self.send(Method::DELETE, endpoint, &[], Body::None).await
    }

    /// POST a multipart form; `describe` is only used for the request log.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: Form,
        describe: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send(Method::POST, endpoint, &[], Body::Multipart(form, describe.to_string())).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
        body: Body,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.log_request(&method, &url, params, &body);
        tracing::debug!(%method, endpoint, "API request");

        let mut req = self.http.request(method.clone(), &url);
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }
        if !params.is_empty() {
            req = req.query(params);
        }
        req = match body {
            Body::None => req,
            Body::Json(v) => req.json(&v),
            Body::Multipart(form, _) => req.multipart(form),
        };

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%method, endpoint, error = %e, "API request failed");
            ApiError::Transport(e.to_string())
        })?;
        let status = resp.status();
        let text = resp.text().await.map_err(ApiError::from)?;

        // Grayed out response body
        log_output(format!("Response ({}):\n{}", status.as_u16(), Paint::new(&text).rgb(100, 100, 100)));

        let envelope: Option<Envelope> = serde_json::from_str(&text).ok();
        if !status.is_success() {
            let message = envelope
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            tracing::warn!(%method, endpoint, status = status.as_u16(), %message, "API returned error status");
            return Err(ApiError::Server { status: status.as_u16(), message });
        }

        let envelope = envelope.ok_or_else(|| ApiError::Decode(format!("{} did not return a JSON envelope", endpoint)))?;
        if !envelope.success {
            let message = envelope.message.unwrap_or_else(|| "Request failed".to_string());
            tracing::info!(%method, endpoint, %message, "API rejected request");
            return Err(ApiError::Server { status: status.as_u16(), message });
        }

        let data = decode_data(envelope.data.unwrap_or(Value::Null))
            .map_err(|e| ApiError::Decode(format!("{}: {}", endpoint, e)))?;
        Ok(ApiResponse { data, message: envelope.message })
    }

    fn log_request(&self, method: &Method, url: &str, params: &[(&str, String)], body: &Body) {
        if SILENT.load(Ordering::Relaxed) {
            return;
        }
        let mut url_for_log = url.to_string();
        if !params.is_empty() {
            let query_string = params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<String>>()
                .join("&");
            url_for_log = format!("{}?{}", url_for_log, query_string);
        }

        let mut parts = Vec::new();
        parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
        parts.push(format!("-X {}", Paint::new(method.as_str()).fg(yansi::Color::Yellow).bold()));
        parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));

        if !self.token.is_empty() {
            parts.push(format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new(format!("'Authorization: Bearer {}'", mask_token(&self.token))).fg(yansi::Color::Magenta)
            ));
        }
        match body {
            Body::None => {}
            Body::Json(d) => {
                parts.push(format!(
                    "{} {}",
                    Paint::new("-H").fg(yansi::Color::Magenta),
                    Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
                ));
                let json_str = serde_json::to_string_pretty(d).unwrap_or_default();
                let escaped_json = json_str.replace('\'', "'\\''");
                parts.push(format!(
                    "{} {}",
                    Paint::new("-d").fg(yansi::Color::Blue),
                    Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
                ));
            }
            Body::Multipart(_, describe) => {
                parts.push(format!(
                    "{} {}",
                    Paint::new("-F").fg(yansi::Color::Blue),
                    Paint::new(format!("'{}'", describe)).fg(yansi::Color::White)
                ));
            }
        }
        log_output(format!("Request:\n{}", parts.join(" ")));
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(format!("Failed to encode request body: {}", e)))
}

/// A missing `data` still decodes into payloads whose fields all default.
fn decode_data<T: DeserializeOwned>(data: Value) -> Result<T, serde_json::Error> {
    match serde_json::from_value(data.clone()) {
        Err(_) if data.is_null() => serde_json::from_value(Value::Object(Default::default())),
        other => other,
    }
}

/// Keep only the last four characters of a token for logs.
fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("****{}", tail)
}
