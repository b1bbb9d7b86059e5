//! Mock billing endpoints
//!
//! Checkout is mocked: "buying" premium flips the flag on the account and
//! the live session. No payment provider is wired up.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info};

use crate::AppState;

const PORTAL_URL: &str = "https://billing.example.com/portal";

/// Create billing routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create-checkout-session", post(create_checkout_session))
        .route("/customer-portal", get(customer_portal))
}

/// POST /api/create-checkout-session - Mock purchase, activates premium
async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(session) = state.sessions.resolve(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "success": false })),
        )
            .into_response();
    };

    if let Err(e) = state.store.set_premium(session.user_id, true) {
        error!("Failed to activate premium: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "success": false })),
        )
            .into_response();
    }
    state.sessions.set_premium(&headers, true);

    info!("Premium activated for: {}", session.username);
    Json(serde_json::json!({ "success": true })).into_response()
}

/// GET /api/customer-portal - Billing portal link for the logged-in account
async fn customer_portal(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if state.sessions.resolve(&headers).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "success": false })),
        )
            .into_response();
    }

    Json(serde_json::json!({ "portal_url": PORTAL_URL })).into_response()
}
