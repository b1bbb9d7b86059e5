//! Equiterm API Server
//!
//! HTTP API backing the stock terminal: accounts and sessions, per-account
//! watchlists, and market data proxied from an upstream vendor.

mod routes;
mod sessions;
mod store;
mod upstream;

use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sessions::SessionMap;
use store::UserStore;
use upstream::UpstreamClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<UserStore>,
    pub sessions: Arc<SessionMap>,
    pub upstream: Arc<UpstreamClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,equiterm_api=debug")),
        )
        .init();

    info!("Starting Equiterm API");

    let api_key = std::env::var("FINNHUB_API_KEY").ok();
    if api_key.is_some() {
        info!("Market data vendor API key found in environment");
    } else {
        info!("No vendor API key found - market data endpoints will serve placeholders");
    }
    let upstream = Arc::new(UpstreamClient::new(api_key));

    let db_path = std::env::var("USERS_DB_PATH").unwrap_or_else(|_| "data/users.db".to_string());
    let store = Arc::new(UserStore::new(&db_path)?);

    let state = AppState {
        store,
        sessions: Arc::new(SessionMap::new()),
        upstream,
    };

    // Configure CORS for the terminal frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state);

    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
