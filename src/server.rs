//! HTTP front end for the relay.

use crate::router::{ForwardOutcome, Relay};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

/// Header carrying the shared API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    relay: Relay,
    api_key: Option<Arc<str>>,
}

impl AppState {
    /// `api_key` enables the `X-API-Key` check on the relay route; empty disables it.
    pub fn new(relay: Relay, api_key: Option<String>) -> Self {
        Self {
            relay,
            api_key: api_key.filter(|key| !key.is_empty()).map(Arc::from),
        }
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        match &self.api_key {
            None => true,
            Some(expected) => headers
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|key| key == expected.as_ref()),
        }
    }
}

#[derive(Debug, Serialize)]
struct RelayResponse {
    status: &'static str,
    #[serde(flatten)]
    outcome: ForwardOutcome,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ruuvi", post(relay_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

async fn relay_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !state.is_authorized(&headers) {
        warn!("rejecting request with missing or wrong API key");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unauthorized"})),
        )
            .into_response();
    }

    // Run on its own task so a panic surfaces as a JoinError, not a dropped connection
    let relay = state.relay.clone();
    let handled = tokio::spawn(async move { relay.handle_body(&body).await }).await;

    match handled {
        Ok(Ok(outcome)) => Json(RelayResponse {
            status: "forwarded",
            outcome,
        })
        .into_response(),
        Ok(Err(_invalid)) => Json(RelayResponse {
            status: "invalid_payload",
            outcome: ForwardOutcome::default(),
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "relay task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "internal error"})),
            )
                .into_response()
        }
    }
}
