//! Backend API response types
//!
//! These types mirror the backend's JSON responses and are converted to
//! core types for use in the terminal.

use equiterm_core::{
    FinancialData, FinancialSection, LeadingIndicator, NewsItem, SearchSuggestion, TerminalError,
};
use serde::Deserialize;

/// Generic acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
    /// Human-readable outcome, e.g. "Added." / "Exists."
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a login or registration attempt.
///
/// Failures carry the backend's plain-text message; transport errors are
/// surfaced separately as [`TerminalError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Established,
    Rejected(String),
}

/// Response from GET /api/watchlist
#[derive(Debug, Clone, Deserialize)]
pub struct WatchlistResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub watchlist: Vec<String>,
}

/// Response from GET /api/news
///
/// Tolerates both field spellings the backend revisions used:
/// `title`/`headline` and `time`/`datetime`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub news: Vec<NewsArticle>,
    /// Optional AI sentiment summary attached to the feed
    #[serde(default)]
    pub ai_sentiment: Option<String>,
}

/// A single article on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct NewsArticle {
    #[serde(alias = "headline")]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(alias = "datetime", default)]
    pub time: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub important: bool,
}

impl NewsArticle {
    pub fn into_news_item(self) -> NewsItem {
        NewsItem {
            title: self.title,
            source: self.source,
            time: self.time,
            url: self.url,
            important: self.important,
        }
    }
}

/// Response from GET /api/leading_indicators
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorsResponse {
    #[serde(default)]
    pub indicators: Vec<LeadingIndicator>,
}

/// Response from GET /api/financials/:type
#[derive(Debug, Clone, Deserialize)]
pub struct FinancialsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl FinancialsResponse {
    /// Decode the payload for the section that was requested.
    ///
    /// The wire carries untyped JSON (`data` differs per section), so the
    /// caller's section choice directs the decode.
    pub fn into_data(self, section: FinancialSection) -> Result<FinancialData, TerminalError> {
        let value = self
            .data
            .ok_or_else(|| TerminalError::not_found("Data not available."))?;

        let decoded = match section {
            FinancialSection::Ratios => serde_json::from_value(value).map(FinancialData::Ratios),
            FinancialSection::Board => serde_json::from_value(value).map(FinancialData::Board),
            FinancialSection::Ownership => {
                serde_json::from_value(value).map(FinancialData::Ownership)
            }
            FinancialSection::Reports => serde_json::from_value(value).map(FinancialData::Reports),
        };

        decoded.map_err(|e| TerminalError::parse(format!("Bad financials payload: {}", e)))
    }
}

/// Response from POST /api/ai_prediction
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
}

/// Response from GET /api/search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchSuggestion>,
}

/// Response from GET /api/customer-portal
#[derive(Debug, Clone, Deserialize)]
pub struct PortalResponse {
    pub portal_url: String,
}
