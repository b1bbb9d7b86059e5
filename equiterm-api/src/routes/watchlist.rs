//! Watchlist endpoints

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use crate::sessions::Session;
use crate::AppState;

/// Create watchlist routes
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/watchlist",
        get(get_watchlist).post(add_ticker).delete(remove_ticker),
    )
}

#[derive(Debug, Deserialize)]
struct TickerBody {
    ticker: String,
}

fn unauthorized() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "success": false })),
    )
        .into_response()
}

fn server_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "success": false })),
    )
        .into_response()
}

fn require_session(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    state.sessions.resolve(headers)
}

/// GET /api/watchlist - All tickers for the logged-in account
async fn get_watchlist(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let Some(session) = require_session(&state, &headers) else {
        return unauthorized();
    };

    match state.store.watchlist(session.user_id) {
        Ok(tickers) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "watchlist": tickers
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to load watchlist: {}", e);
            server_error()
        }
    }
}

/// POST /api/watchlist - Add a ticker; duplicates acknowledge with "Exists."
async fn add_ticker(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TickerBody>,
) -> impl IntoResponse {
    let Some(session) = require_session(&state, &headers) else {
        return unauthorized();
    };

    match state.store.add_ticker(session.user_id, &body.ticker) {
        Ok(true) => Json(serde_json::json!({
            "success": true,
            "message": "Added."
        }))
        .into_response(),
        Ok(false) => Json(serde_json::json!({
            "success": false,
            "message": "Exists."
        }))
        .into_response(),
        Err(e) => {
            error!("Failed to add {}: {}", body.ticker, e);
            server_error()
        }
    }
}

/// DELETE /api/watchlist - Remove a ticker; removing an absent one still acks
async fn remove_ticker(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TickerBody>,
) -> impl IntoResponse {
    let Some(session) = require_session(&state, &headers) else {
        return unauthorized();
    };

    match state.store.remove_ticker(session.user_id, &body.ticker) {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": "Removed."
        }))
        .into_response(),
        Err(e) => {
            error!("Failed to remove {}: {}", body.ticker, e);
            server_error()
        }
    }
}
