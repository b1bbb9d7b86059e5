//! API route definitions

mod auth;
mod billing;
mod health;
mod market_data;
mod watchlist;

use axum::Router;

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(watchlist::routes())
        .merge(market_data::routes())
        .merge(billing::routes())
        .merge(health::routes())
}
