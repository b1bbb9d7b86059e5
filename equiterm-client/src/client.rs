//! Backend API client
//!
//! Provides methods for interacting with the Equiterm backend REST API.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use async_trait::async_trait;
use equiterm_core::{
    AuthStatus, Credentials, FinancialData, FinancialSection, LeadingIndicator, NewsItem,
    SearchSuggestion, TerminalError, TerminalResult,
};

use crate::types::{
    AckResponse, FinancialsResponse, IndicatorsResponse, NewsResponse, PortalResponse,
    PredictionResponse, SearchResponse, SessionOutcome, WatchlistResponse,
};
use crate::Backend;

/// Default base URL for a locally running backend
const DEFAULT_API_BASE: &str = "http://127.0.0.1:3001";

/// Equiterm backend API client
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new client against the default local backend
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Create a client against an explicit base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> TerminalResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| TerminalError::network(format!("Failed to reach {}: {}", path, e)))?;

        Self::decode(path, response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> TerminalResult<T> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TerminalError::network(format!("Failed to reach {}: {}", path, e)))?;

        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> TerminalResult<T> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(TerminalError::not_found(format!("{} not found", path)));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(TerminalError::auth(format!(
                "{} refused ({}): {}",
                path, status, body
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TerminalError::api(format!(
                "Backend error on {} ({}): {}",
                path, status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TerminalError::parse(format!("Failed to parse {} response: {}", path, e)))
    }

    /// Auth endpoints answer rejections with a JSON body and a 4xx status;
    /// both shapes collapse into [`SessionOutcome::Rejected`].
    async fn session_attempt(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> TerminalResult<SessionOutcome> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| TerminalError::network(format!("Failed to reach {}: {}", path, e)))?;

        let status = response.status();
        let ack: AckResponse = response
            .json()
            .await
            .map_err(|e| TerminalError::parse(format!("Failed to parse {} response: {}", path, e)))?;

        if status.is_success() && ack.success {
            Ok(SessionOutcome::Established)
        } else {
            Ok(SessionOutcome::Rejected(
                ack.message.unwrap_or_else(|| "Invalid credentials.".to_string()),
            ))
        }
    }
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for BackendClient {
    /// GET /api/status — fails open to guest on any failure
    #[instrument(skip(self))]
    async fn status(&self) -> AuthStatus {
        match self.get_json::<AuthStatus>("/api/status", &[]).await {
            Ok(status) => status,
            Err(e) => {
                warn!("Status check failed, treating session as guest: {}", e);
                AuthStatus::guest()
            }
        }
    }

    /// POST /api/register
    #[instrument(skip(self, credentials))]
    async fn register(&self, credentials: &Credentials) -> TerminalResult<SessionOutcome> {
        self.session_attempt("/api/register", credentials).await
    }

    /// POST /api/login
    #[instrument(skip(self, credentials))]
    async fn login(&self, credentials: &Credentials) -> TerminalResult<SessionOutcome> {
        self.session_attempt("/api/login", credentials).await
    }

    /// POST /api/logout
    #[instrument(skip(self))]
    async fn logout(&self) -> TerminalResult<()> {
        self.post_json::<AckResponse>("/api/logout", &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// GET /api/watchlist
    #[instrument(skip(self))]
    async fn watchlist(&self) -> TerminalResult<Vec<String>> {
        let response: WatchlistResponse = self.get_json("/api/watchlist", &[]).await?;
        Ok(response.watchlist)
    }

    /// POST /api/watchlist
    #[instrument(skip(self))]
    async fn add_to_watchlist(&self, ticker: &str) -> TerminalResult<String> {
        let ack: AckResponse = self
            .post_json("/api/watchlist", &serde_json::json!({ "ticker": ticker }))
            .await?;
        Ok(ack.message.unwrap_or_else(|| "Added.".to_string()))
    }

    /// DELETE /api/watchlist
    #[instrument(skip(self))]
    async fn remove_from_watchlist(&self, ticker: &str) -> TerminalResult<String> {
        let url = self.url("/api/watchlist");
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .json(&serde_json::json!({ "ticker": ticker }))
            .send()
            .await
            .map_err(|e| TerminalError::network(format!("Failed to reach /api/watchlist: {}", e)))?;

        let ack: AckResponse = Self::decode("/api/watchlist", response).await?;
        Ok(ack.message.unwrap_or_else(|| "Removed.".to_string()))
    }

    /// GET /api/news?ticker=
    #[instrument(skip(self))]
    async fn news(&self, ticker: Option<&str>) -> TerminalResult<Vec<NewsItem>> {
        let query: Vec<(&str, &str)> = match ticker {
            Some(t) => vec![("ticker", t)],
            None => Vec::new(),
        };
        let response: NewsResponse = self.get_json("/api/news", &query).await?;
        Ok(response
            .news
            .into_iter()
            .map(|article| article.into_news_item())
            .collect())
    }

    /// GET /api/leading_indicators
    #[instrument(skip(self))]
    async fn leading_indicators(&self) -> TerminalResult<Vec<LeadingIndicator>> {
        let response: IndicatorsResponse = self.get_json("/api/leading_indicators", &[]).await?;
        Ok(response.indicators)
    }

    /// GET /api/financials/:type?ticker=
    #[instrument(skip(self))]
    async fn financials(
        &self,
        section: FinancialSection,
        ticker: &str,
    ) -> TerminalResult<FinancialData> {
        let path = format!("/api/financials/{}", section);
        let response: FinancialsResponse = self.get_json(&path, &[("ticker", ticker)]).await?;
        response.into_data(section)
    }

    /// POST /api/ai_prediction
    #[instrument(skip(self))]
    async fn ai_prediction(&self, ticker: &str) -> TerminalResult<String> {
        let response: PredictionResponse = self
            .post_json("/api/ai_prediction", &serde_json::json!({ "ticker": ticker }))
            .await?;
        Ok(response.prediction)
    }

    /// GET /api/search?q=
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> TerminalResult<Vec<SearchSuggestion>> {
        let response: SearchResponse = self.get_json("/api/search", &[("q", query)]).await?;
        Ok(response.results)
    }

    /// POST /api/create-checkout-session
    #[instrument(skip(self))]
    async fn create_checkout_session(&self) -> TerminalResult<()> {
        self.post_json::<AckResponse>("/api/create-checkout-session", &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// GET /api/customer-portal
    #[instrument(skip(self))]
    async fn customer_portal(&self) -> TerminalResult<String> {
        let response: PortalResponse = self.get_json("/api/customer-portal", &[]).await?;
        Ok(response.portal_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Backend;

    #[tokio::test]
    async fn status_fails_open_when_backend_unreachable() {
        // Nothing listens on this port
        let client = BackendClient::with_base_url("http://127.0.0.1:1");
        let status = client.status().await;
        assert_eq!(status, AuthStatus::guest());
    }

    #[tokio::test]
    async fn data_calls_surface_network_errors() {
        let client = BackendClient::with_base_url("http://127.0.0.1:1");
        let result = client.news(Some("AAPL")).await;
        assert!(matches!(result, Err(TerminalError::Network(_))));
    }

    #[test]
    fn url_joins_base_and_path() {
        let client = BackendClient::with_base_url("http://localhost:3001");
        assert_eq!(
            client.url("/api/status"),
            "http://localhost:3001/api/status"
        );
    }
}
