//! HTTP route handlers.

use crate::app::AppState;
use crate::models::{InboundRequest, OutboundResponse};
use crate::{Error, Result};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::response::{Html, Json};
use serde_json::{json, Value};
use tracing::{debug, error};

const INDEX_HTML: &str = include_str!("../data/index.html");

/// `GET /`: endpoint documentation.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /healthz`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /api/gemini`: forwards `{"prompt": ...}` upstream and relays the
/// generated text in the envelope. Every failure comes back through
/// [`Error`]'s `IntoResponse`.
pub async fn gemini_proxy(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<OutboundResponse>> {
    let body = body.map_err(|rejection| {
        error!("Failed to read request body: {}", rejection.body_text());
        Error::RequestBody(rejection)
    })?;

    let request = InboundRequest::parse(&body).inspect_err(|_| {
        error!("Invalid request: missing prompt");
    })?;

    debug!("Received prompt: {}", request.prompt);

    let Some(api_key) = state.api_key.as_deref() else {
        error!("API key not configured");
        return Err(Error::ApiKeyNotConfigured);
    };

    let text = state
        .generator
        .generate_text(api_key, &request.prompt)
        .await?;

    debug!(
        "Received response from Gemini: {}...",
        text.chars().take(100).collect::<String>()
    );

    Ok(Json(OutboundResponse::success(text)))
}
