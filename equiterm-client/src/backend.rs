//! Backend abstraction consumed by the panel controller
//!
//! The controller never talks to `reqwest` directly; it goes through this
//! trait so its render logic can be exercised against a mock backend.

use async_trait::async_trait;
use equiterm_core::{
    AuthStatus, Credentials, FinancialData, FinancialSection, LeadingIndicator, NewsItem,
    SearchSuggestion, TerminalResult,
};

use crate::types::SessionOutcome;

/// The backend operations the terminal depends on
#[async_trait]
pub trait Backend: Send + Sync {
    /// Current session status. Fails open to [`AuthStatus::guest`]; this
    /// method never errors.
    async fn status(&self) -> AuthStatus;

    async fn register(&self, credentials: &Credentials) -> TerminalResult<SessionOutcome>;

    async fn login(&self, credentials: &Credentials) -> TerminalResult<SessionOutcome>;

    async fn logout(&self) -> TerminalResult<()>;

    /// The account's watchlist tickers; the backend is the sole source of
    /// truth, the terminal only holds a rendered snapshot.
    async fn watchlist(&self) -> TerminalResult<Vec<String>>;

    /// Returns the backend's acknowledgement message ("Added." / "Exists.")
    async fn add_to_watchlist(&self, ticker: &str) -> TerminalResult<String>;

    async fn remove_from_watchlist(&self, ticker: &str) -> TerminalResult<String>;

    /// Company news for `ticker`, or general market news when `None`
    async fn news(&self, ticker: Option<&str>) -> TerminalResult<Vec<NewsItem>>;

    async fn leading_indicators(&self) -> TerminalResult<Vec<LeadingIndicator>>;

    async fn financials(
        &self,
        section: FinancialSection,
        ticker: &str,
    ) -> TerminalResult<FinancialData>;

    async fn ai_prediction(&self, ticker: &str) -> TerminalResult<String>;

    async fn search(&self, query: &str) -> TerminalResult<Vec<SearchSuggestion>>;

    /// Mock checkout: flips the account to premium server-side
    async fn create_checkout_session(&self) -> TerminalResult<()>;

    /// URL of the subscription management portal
    async fn customer_portal(&self) -> TerminalResult<String>;
}
