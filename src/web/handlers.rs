//! HTTP request handlers
//!
//! Both search endpoints share one shape: validate the query, build the
//! engine request, normalize whatever comes back. An empty query is a
//! 400 before the engine is ever contacted; an engine failure is a 500
//! with a generic envelope and an empty list. The engine's own error
//! text goes to the server log, never to the caller.

use super::state::AppState;
use crate::query::{product_query, suggest_query, DEFAULT_SUGGEST_SIZE};
use crate::results::{normalize, Product};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

/// Request payload for both search endpoints
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Free text typed by the user; a missing field counts as empty
    #[serde(default)]
    pub query: String,
}

/// Successful /search payload
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Product>,
}

/// Successful /suggest payload
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

/// Product search handler
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Response {
    let query = request.query.trim();
    if query.is_empty() {
        return missing_query();
    }

    debug!("product search: {}", query);

    let body = product_query(query);
    match state.engine.search(state.product_index(), &body).await {
        Ok(raw) => Json(SearchResponse {
            results: normalize::products(&raw),
        })
        .into_response(),
        Err(e) => {
            error!("product search failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "search failed", "results": [] })),
            )
                .into_response()
        }
    }
}

/// Prefix completion handler
pub async fn suggest(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Response {
    let query = request.query.trim();
    if query.is_empty() {
        return missing_query();
    }

    debug!("completion lookup: {}", query);

    let body = suggest_query(query, DEFAULT_SUGGEST_SIZE);
    match state.engine.search(state.vocab_index(), &body).await {
        Ok(raw) => Json(SuggestResponse {
            suggestions: normalize::suggestions(&raw),
        })
        .into_response(),
        Err(e) => {
            error!("completion lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "suggest failed", "suggestions": [] })),
            )
                .into_response()
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// 400 envelope shared by both endpoints; not an incident, not logged
fn missing_query() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "missing query" })),
    )
        .into_response()
}
