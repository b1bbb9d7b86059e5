//! Market data payloads: news, indicators, search suggestions, predictions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single news article shown in a news panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Headline text
    pub title: String,
    /// Publishing source (e.g. "Reuters")
    pub source: String,
    /// Pre-formatted publication time, e.g. "04 Mar 16:20"
    pub time: String,
    /// Link to the full article
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Marks breaking/high-impact items for highlighting
    #[serde(default)]
    pub important: bool,
}

/// A leading indicator with its correlation to the focus instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadingIndicator {
    /// Indicator name, e.g. "Sector Momentum"
    pub name: String,
    /// Correlation coefficient; serialized as a decimal string on the wire
    pub correlation: Decimal,
    /// Qualitative impact label (e.g. "High")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    /// Recent change, e.g. "+2.1%"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
}

/// One entry in the ticker-search suggestion list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSuggestion {
    /// Bare symbol, e.g. "AAPL"
    pub symbol: String,
    /// Exchange-qualified symbol for chart embedding, e.g. "NASDAQ:AAPL"
    #[serde(rename = "displaySymbol")]
    pub display_symbol: String,
    /// Company description, e.g. "APPLE INC"
    pub description: String,
}

/// AI prediction text for the focus instrument (premium feature)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Markdown-ish analysis text
    pub prediction: String,
}
