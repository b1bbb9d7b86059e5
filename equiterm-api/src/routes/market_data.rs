//! Market data endpoints: news, search, financials, premium analytics

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use equiterm_core::{FinancialSection, LeadingIndicator};
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::AppState;

/// Create market data routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/news", get(get_news))
        .route("/search", get(search_ticker))
        .route("/financials/{section}", get(get_financials))
        .route("/leading_indicators", get(get_leading_indicators))
        .route("/ai_prediction", post(ai_prediction))
}

#[derive(Debug, Deserialize)]
struct NewsQuery {
    ticker: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
struct FinancialsQuery {
    ticker: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictionBody {
    ticker: Option<String>,
}

fn premium_required() -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        Json(serde_json::json!({ "message": "Premium needed" })),
    )
        .into_response()
}

/// GET /api/news?ticker= - Company news, or general market news without a ticker
async fn get_news(
    State(state): State<AppState>,
    Query(params): Query<NewsQuery>,
) -> impl IntoResponse {
    let news = state.upstream.news(params.ticker.as_deref()).await;
    Json(serde_json::json!({
        "success": true,
        "news": news
    }))
}

/// GET /api/search?q= - Ticker symbol lookup
async fn search_ticker(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let results = state.upstream.search(&params.q).await;
    Json(serde_json::json!({ "results": results }))
}

/// GET /api/financials/:section?ticker= - Financial metrics per section.
///
/// Only ratios come from the vendor. Board data would need a paid vendor
/// tier, so it returns an upsell row; ownership and reports are empty.
async fn get_financials(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Query(params): Query<FinancialsQuery>,
) -> impl IntoResponse {
    let ticker = params.ticker.unwrap_or_else(|| "AAPL".to_string());

    let Ok(section) = FinancialSection::from_str(&section) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "success": false,
                "message": "Unknown section"
            })),
        )
            .into_response();
    };

    let data = match section {
        FinancialSection::Ratios => match state.upstream.ratios(&ticker).await {
            Some(ratios) => serde_json::json!(ratios),
            None => {
                return Json(serde_json::json!({
                    "success": false,
                    "data": serde_json::Value::Null
                }))
                .into_response();
            }
        },
        FinancialSection::Board => serde_json::json!([
            {"name": "Data Only in Paid API", "role": "Upgrade for full access"}
        ]),
        FinancialSection::Ownership | FinancialSection::Reports => serde_json::json!([]),
    };

    Json(serde_json::json!({
        "success": true,
        "data": data
    }))
    .into_response()
}

/// GET /api/leading_indicators - Premium-only indicator list
async fn get_leading_indicators(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let premium = state
        .sessions
        .resolve(&headers)
        .map(|s| s.is_premium)
        .unwrap_or(false);
    if !premium {
        return premium_required();
    }

    let indicators = vec![LeadingIndicator {
        name: "Sector Momentum".to_string(),
        correlation: dec!(0.85),
        impact: Some("High".to_string()),
        change: Some("+2.1%".to_string()),
    }];

    Json(serde_json::json!({
        "success": true,
        "indicators": indicators
    }))
    .into_response()
}

/// POST /api/ai_prediction - Premium-only analysis text for a ticker
async fn ai_prediction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<PredictionBody>,
) -> impl IntoResponse {
    let premium = state
        .sessions
        .resolve(&headers)
        .map(|s| s.is_premium)
        .unwrap_or(false);
    if !premium {
        return premium_required();
    }

    let ticker = body.ticker.unwrap_or_else(|| "Unknown".to_string());
    Json(serde_json::json!({
        "prediction": format!(
            "**AI analysis for {}:** Strong buy signal detected in technical indicators.",
            ticker
        )
    }))
    .into_response()
}
