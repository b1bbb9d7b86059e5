//! Market-data vendor client
//!
//! Thin client for a Finnhub-style REST vendor. The API key is optional:
//! without one every call degrades to a placeholder payload so the terminal
//! stays usable offline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use equiterm_core::{NewsItem, SearchSuggestion};
use serde::Deserialize;
use tracing::{instrument, warn};

const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";
const NEWS_LIMIT: usize = 15;
const SEARCH_LIMIT: usize = 10;

/// Client for the upstream market-data vendor
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VendorNewsItem {
    headline: String,
    source: String,
    #[serde(default)]
    datetime: i64,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VendorSearchResponse {
    #[serde(default)]
    result: Vec<VendorSearchResult>,
}

#[derive(Debug, Deserialize)]
struct VendorSearchResult {
    symbol: String,
    description: String,
    #[serde(rename = "displaySymbol")]
    display_symbol: String,
}

#[derive(Debug, Deserialize)]
struct VendorMetricResponse {
    #[serde(default)]
    metric: BTreeMap<String, serde_json::Value>,
}

impl UpstreamClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Whether a vendor API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// News for a ticker, or general market news when no ticker is given.
    /// Never fails; vendor trouble yields a single placeholder item.
    #[instrument(skip(self))]
    pub async fn news(&self, ticker: Option<&str>) -> Vec<NewsItem> {
        let Some(key) = &self.api_key else {
            return vec![NewsItem {
                title: "API Key Missing".to_string(),
                source: "System".to_string(),
                time: "Now".to_string(),
                url: None,
                important: true,
            }];
        };

        let url = match ticker.filter(|t| *t != "market") {
            Some(ticker) => {
                let today = Utc::now().date_naive();
                let last_week = today - chrono::Duration::days(7);
                format!(
                    "{}/company-news?symbol={}&from={}&to={}&token={}",
                    self.base_url,
                    local_symbol(ticker),
                    last_week,
                    today,
                    key
                )
            }
            None => format!("{}/news?category=general&token={}", self.base_url, key),
        };

        match self.get_json::<Vec<VendorNewsItem>>(&url).await {
            Some(items) => items
                .into_iter()
                .take(NEWS_LIMIT)
                .map(|item| NewsItem {
                    title: item.headline,
                    source: item.source,
                    time: format_timestamp(item.datetime),
                    url: item.url,
                    important: false,
                })
                .collect(),
            None => vec![NewsItem {
                title: "No news found or API limit reached".to_string(),
                source: "System".to_string(),
                time: "Now".to_string(),
                url: None,
                important: false,
            }],
        }
    }

    /// Symbol lookup. Dotted derivative listings are filtered out.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Vec<SearchSuggestion> {
        let Some(key) = &self.api_key else {
            return Vec::new();
        };
        if query.is_empty() {
            return Vec::new();
        }

        let url = format!("{}/search?q={}&token={}", self.base_url, query, key);
        match self.get_json::<VendorSearchResponse>(&url).await {
            Some(response) => response
                .result
                .into_iter()
                .filter(|item| !item.symbol.contains('.'))
                .take(SEARCH_LIMIT)
                .map(|item| SearchSuggestion {
                    symbol: item.symbol,
                    display_symbol: item.display_symbol,
                    description: item.description,
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Key financial ratios for a ticker; `None` when the vendor has nothing.
    #[instrument(skip(self))]
    pub async fn ratios(&self, ticker: &str) -> Option<BTreeMap<String, String>> {
        let key = self.api_key.as_ref()?;
        let url = format!(
            "{}/stock/metric?symbol={}&metric=all&token={}",
            self.base_url,
            local_symbol(ticker),
            key
        );

        let response = self.get_json::<VendorMetricResponse>(&url).await?;
        if response.metric.is_empty() {
            return None;
        }

        let metrics = &response.metric;
        let mut ratios = BTreeMap::new();
        ratios.insert("Price".to_string(), metric_str(metrics, "currentEv/freeCashFlowAnnual", ""));
        ratios.insert("P/E Ratio".to_string(), metric_str(metrics, "peExclExtraTTM", ""));
        ratios.insert("Div Yield".to_string(), metric_str(metrics, "dividendYieldIndicatedAnnual", "%"));
        ratios.insert("Market Cap".to_string(), metric_str(metrics, "marketCapitalization", "M"));
        ratios.insert("Debt/Equity".to_string(), metric_str(metrics, "totalDebt/totalEquityQuarterly", ""));
        ratios.insert("ROE".to_string(), metric_str(metrics, "roeTTM", "%"));
        ratios.insert("52W High".to_string(), metric_str(metrics, "52WeekHigh", ""));
        Some(ratios)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Option<T> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Upstream request failed: {}", e);
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("Upstream returned status {}", response.status());
            return None;
        }
        match response.json::<T>().await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to parse upstream response: {}", e);
                None
            }
        }
    }
}

/// Strip the exchange prefix ("NASDAQ:AAPL" -> "AAPL")
fn local_symbol(ticker: &str) -> &str {
    ticker.rsplit(':').next().unwrap_or(ticker)
}

fn format_timestamp(ts: i64) -> String {
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%d %b %H:%M").to_string(),
        None => "Now".to_string(),
    }
}

fn metric_str(
    metrics: &BTreeMap<String, serde_json::Value>,
    key: &str,
    suffix: &str,
) -> String {
    let value = match metrics.get(key) {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => "N/A".to_string(),
    };
    format!("{}{}", value, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_symbol_strips_exchange_prefix() {
        assert_eq!(local_symbol("NASDAQ:AAPL"), "AAPL");
        assert_eq!(local_symbol("TSLA"), "TSLA");
    }

    #[test]
    fn timestamp_formatting() {
        // 2024-01-15 12:30:00 UTC
        assert_eq!(format_timestamp(1705321800), "15 Jan 12:30");
        assert_eq!(format_timestamp(i64::MAX), "Now");
    }

    #[test]
    fn metric_formatting_handles_missing_and_suffixes() {
        let mut metrics = BTreeMap::new();
        metrics.insert("roeTTM".to_string(), serde_json::json!(42.5));

        assert_eq!(metric_str(&metrics, "roeTTM", "%"), "42.5%");
        assert_eq!(metric_str(&metrics, "peExclExtraTTM", ""), "N/A");
    }

    #[tokio::test]
    async fn missing_api_key_degrades_softly() {
        let client = UpstreamClient::new(None);

        let news = client.news(None).await;
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].title, "API Key Missing");

        assert!(client.search("asml").await.is_empty());
        assert!(client.ratios("NASDAQ:AAPL").await.is_none());
    }
}
