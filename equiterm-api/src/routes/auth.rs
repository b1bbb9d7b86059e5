//! Account and session endpoints

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use equiterm_core::{AuthStatus, Credentials};
use tracing::{error, info, warn};

use crate::sessions::{Session, SessionMap};
use crate::store::StoreError;
use crate::AppState;

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/status", get(status))
}

/// POST /api/register - Create an account and start a session
async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> impl IntoResponse {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "message": "Fill in all fields."
            })),
        )
            .into_response();
    }

    let user = match state
        .store
        .create_user(credentials.username.trim(), &credentials.password)
    {
        Ok(user) => user,
        Err(StoreError::UsernameTaken) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Username taken."
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!("Failed to create account: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Registration failed."
                })),
            )
                .into_response();
        }
    };

    info!("Registered account: {}", user.username);
    let token = state.sessions.create(Session {
        user_id: user.id,
        username: user.username,
        is_premium: user.is_premium,
    });

    (
        StatusCode::OK,
        [(SET_COOKIE, SessionMap::cookie_for(&token))],
        Json(serde_json::json!({ "success": true })),
    )
        .into_response()
}

/// POST /api/login - Verify credentials and start a session
async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> impl IntoResponse {
    let verified = match state
        .store
        .verify_login(&credentials.username, &credentials.password)
    {
        Ok(user) => user,
        Err(e) => {
            error!("Login lookup failed: {}", e);
            None
        }
    };

    match verified {
        Some(user) => {
            info!("Login: {}", user.username);
            let token = state.sessions.create(Session {
                user_id: user.id,
                username: user.username,
                is_premium: user.is_premium,
            });
            (
                StatusCode::OK,
                [(SET_COOKIE, SessionMap::cookie_for(&token))],
                Json(serde_json::json!({ "success": true })),
            )
                .into_response()
        }
        None => {
            warn!("Rejected login for: {}", credentials.username);
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Login failed."
                })),
            )
                .into_response()
        }
    }
}

/// POST /api/logout - End the session
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    state.sessions.destroy(&headers);
    (
        StatusCode::OK,
        [(SET_COOKIE, SessionMap::clearing_cookie())],
        Json(serde_json::json!({ "success": true })),
    )
}

/// GET /api/status - Current session status; never errors, defaults to guest
async fn status(State(state): State<AppState>, headers: HeaderMap) -> Json<AuthStatus> {
    let status = match state.sessions.resolve(&headers) {
        Some(session) => AuthStatus {
            logged_in: true,
            is_premium: session.is_premium,
            username: session.username,
        },
        None => AuthStatus::guest(),
    };
    Json(status)
}
