//! Terminal controller
//!
//! Owns all mutable UI state and mediates every selection event. One
//! instrument selection fans out to four independent renders (panels,
//! financial tab, chart, AI prediction); each render reads the already
//! updated focus state, so their order is irrelevant.

use std::path::Path;
use std::sync::Arc;

use equiterm_client::{Backend, SessionOutcome};
use equiterm_core::{
    ContentType, Credentials, FinancialSection, Instrument, PanelId, SearchSuggestion,
    TerminalError, TerminalResult,
};
use tracing::{info, instrument, warn};

use crate::chart::ChartConfig;
use crate::panels::PanelRegistry;
use crate::persistence::{SessionSnapshot, SnapshotStore};
use crate::search::SearchDebouncer;
use crate::session::AuthGate;
use crate::view::{FinancialTabView, TerminalView};

/// Upsell text shown in the prediction slot for free-tier accounts
const PREDICTION_UPSELL: &str = "Upgrade to Premium for AI analysis.";

/// Outcome of an auth flow (login, registration, logout, purchase)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFlowResult {
    /// Session changed; the caller must persist-and-reload the whole UI.
    /// This is the only full-reload path in the terminal.
    ReloadRequired,
    /// The backend (or local validation) rejected the attempt
    Rejected(String),
}

/// The terminal's application state, threaded explicitly through all
/// render calls
pub struct TerminalController {
    backend: Arc<dyn Backend>,
    gate: AuthGate,
    registry: PanelRegistry,
    snapshots: SnapshotStore,
    search: SearchDebouncer,
    focus: Instrument,
    chart: Option<ChartConfig>,
    financial_section: FinancialSection,
    financial_tab: Option<FinancialTabView>,
    prediction: Option<String>,
}

impl TerminalController {
    pub fn new(backend: Arc<dyn Backend>, snapshot_path: impl AsRef<Path>) -> Self {
        let gate = AuthGate::new(Arc::clone(&backend));
        let search = SearchDebouncer::new(Arc::clone(&backend));
        Self {
            backend,
            gate,
            registry: PanelRegistry::new(),
            snapshots: SnapshotStore::new(snapshot_path),
            search,
            focus: Instrument::default_focus(),
            chart: None,
            financial_section: FinancialSection::Ratios,
            financial_tab: None,
            prediction: None,
        }
    }

    /// First render: restore the persisted snapshot when present, apply
    /// defaults otherwise, then render everything.
    #[instrument(skip(self))]
    pub async fn init(&mut self) {
        let snapshot = match self.snapshots.load() {
            Some(snapshot) => {
                info!("Restoring persisted session: {}", snapshot.instrument.symbol_id);
                snapshot
            }
            None => SessionSnapshot::defaults(),
        };

        self.registry
            .restore_assignments(snapshot.panel1, snapshot.panel2);
        self.select_instrument(
            snapshot.instrument.symbol_id,
            snapshot.instrument.display_name,
        )
        .await;
    }

    // ------------------------------------------------------------------
    // Focus selection (fan-out)
    // ------------------------------------------------------------------

    /// Select a new focus instrument.
    ///
    /// Focus state is overwritten before anything else runs; every
    /// dependent render then reads the new instrument.
    #[instrument(skip(self))]
    pub async fn select_instrument(&mut self, symbol_id: String, display_name: String) {
        self.focus = Instrument::new(symbol_id, display_name);
        self.search.clear();
        self.chart = Some(ChartConfig::for_instrument(&self.focus));

        let status = self.gate.status().await;

        for panel in PanelId::ALL {
            self.registry
                .refresh(&self.backend, &self.focus, &status, panel)
                .await;
        }

        self.render_financial_tab().await;
        self.refresh_prediction(status.is_premium).await;
    }

    /// Select by bare ticker (watchlist click); resolves against the
    /// built-in instrument table, falling back to the ticker itself.
    pub async fn select_ticker(&mut self, ticker: &str) {
        let instrument = Instrument::well_known(ticker)
            .unwrap_or_else(|| Instrument::new(ticker.to_string(), ticker.to_string()));
        self.select_instrument(instrument.symbol_id, instrument.display_name)
            .await;
    }

    /// Current focus instrument
    pub fn focus(&self) -> &Instrument {
        &self.focus
    }

    // ------------------------------------------------------------------
    // Panels
    // ------------------------------------------------------------------

    /// Assign content to a panel from the raw selector value.
    ///
    /// Unknown content types render the fallback and issue no backend
    /// call of any kind.
    pub async fn set_panel_content(&mut self, panel: PanelId, content_type: &str) {
        let content: ContentType = match content_type.parse() {
            Ok(content) => content,
            Err(_) => {
                self.registry.set_unavailable(panel, content_type);
                return;
            }
        };

        let status = self.gate.status().await;
        self.registry
            .assign_and_render(&self.backend, &self.focus, &status, panel, content)
            .await;
    }

    // ------------------------------------------------------------------
    // Watchlist
    // ------------------------------------------------------------------

    /// Add the focus instrument to the watchlist, then broadcast-refresh
    /// every panel currently showing it
    #[instrument(skip(self))]
    pub async fn add_focus_to_watchlist(&mut self) -> TerminalResult<String> {
        let ticker = self.focus.local_symbol().to_string();
        let message = self.backend.add_to_watchlist(&ticker).await?;
        self.refresh_watchlist_panels().await;
        Ok(message)
    }

    /// Remove a ticker from the watchlist, then broadcast-refresh every
    /// panel currently showing it
    #[instrument(skip(self))]
    pub async fn remove_from_watchlist(&mut self, ticker: &str) -> TerminalResult<String> {
        let message = self.backend.remove_from_watchlist(ticker).await?;
        self.refresh_watchlist_panels().await;
        Ok(message)
    }

    /// Re-render the panels assigned `watchlist` - all of them, not just
    /// the one that triggered the mutation, and nothing else
    async fn refresh_watchlist_panels(&mut self) {
        let showing = self.registry.panels_showing(ContentType::Watchlist);
        if showing.is_empty() {
            return;
        }

        let status = self.gate.status().await;
        for panel in showing {
            self.registry
                .refresh(&self.backend, &self.focus, &status, panel)
                .await;
        }
    }

    // ------------------------------------------------------------------
    // Financial tab
    // ------------------------------------------------------------------

    /// Switch the active financial tab and render it for the focus
    /// instrument
    pub async fn show_financial_tab(&mut self, section: FinancialSection) {
        self.financial_section = section;
        self.render_financial_tab().await;
    }

    async fn render_financial_tab(&mut self) {
        self.financial_tab = Some(FinancialTabView::Loading);

        let view = match self
            .backend
            .financials(self.financial_section, self.focus.local_symbol())
            .await
        {
            Ok(data) if data.is_empty() => {
                FinancialTabView::Message("Data not available.".to_string())
            }
            Ok(data) => FinancialTabView::Data(data),
            Err(TerminalError::NotFound(_)) => {
                FinancialTabView::Message("Data not available.".to_string())
            }
            Err(e) => {
                warn!("Financial tab degraded: {}", e);
                FinancialTabView::Message("Error loading financial data.".to_string())
            }
        };

        self.financial_tab = Some(view);
    }

    // ------------------------------------------------------------------
    // AI prediction (premium)
    // ------------------------------------------------------------------

    async fn refresh_prediction(&mut self, is_premium: bool) {
        if !is_premium {
            self.prediction = Some(PREDICTION_UPSELL.to_string());
            return;
        }

        self.prediction = match self.backend.ai_prediction(self.focus.local_symbol()).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Prediction refresh failed: {}", e);
                Some("Prediction unavailable.".to_string())
            }
        };
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Keystroke in the ticker search box
    pub fn on_search_input(&mut self, text: &str) {
        self.search.on_input(text);
    }

    /// The search box lost focus
    pub fn on_search_blur(&mut self) {
        self.search.blur();
    }

    /// A suggestion was picked from the dropdown
    pub async fn pick_suggestion(&mut self, suggestion: SearchSuggestion) {
        self.select_instrument(suggestion.display_symbol, suggestion.description)
            .await;
    }

    // ------------------------------------------------------------------
    // Auth flows
    // ------------------------------------------------------------------

    /// Register a new account. Local validation mirrors the form checks:
    /// non-blank username, plausible email, password of at least 8 chars.
    #[instrument(skip(self, email, password))]
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> TerminalResult<AuthFlowResult> {
        if username.trim().is_empty() || !is_valid_email(email) || password.len() < 8 {
            return Ok(AuthFlowResult::Rejected("Invalid input.".to_string()));
        }

        let credentials = Credentials::new(username.trim(), password);
        match self.backend.register(&credentials).await? {
            SessionOutcome::Established => Ok(self.persist_and_reload()),
            SessionOutcome::Rejected(message) => Ok(AuthFlowResult::Rejected(message)),
        }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> TerminalResult<AuthFlowResult> {
        let credentials = Credentials::new(username, password);
        match self.backend.login(&credentials).await? {
            SessionOutcome::Established => Ok(self.persist_and_reload()),
            SessionOutcome::Rejected(message) => Ok(AuthFlowResult::Rejected(message)),
        }
    }

    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> TerminalResult<AuthFlowResult> {
        self.backend.logout().await?;
        Ok(self.persist_and_reload())
    }

    /// Mock checkout: the backend flips the account to premium
    #[instrument(skip(self))]
    pub async fn buy_premium(&mut self) -> TerminalResult<AuthFlowResult> {
        self.backend.create_checkout_session().await?;
        Ok(self.persist_and_reload())
    }

    /// URL of the subscription management portal
    pub async fn open_customer_portal(&self) -> TerminalResult<String> {
        self.backend.customer_portal().await
    }

    /// Persist the current snapshot so the reload restores focus and panel
    /// assignments, then signal the reload
    fn persist_and_reload(&mut self) -> AuthFlowResult {
        let snapshot = SessionSnapshot {
            instrument: self.focus.clone(),
            panel1: self
                .registry
                .assignment(PanelId::Panel1)
                .unwrap_or(ContentType::News),
            panel2: self
                .registry
                .assignment(PanelId::Panel2)
                .unwrap_or(ContentType::Network),
        };

        if let Err(e) = self.snapshots.save(&snapshot) {
            // Reload still happens; the next session just starts from
            // defaults.
            warn!("Failed to persist session snapshot: {}", e);
        }

        AuthFlowResult::ReloadRequired
    }

    // ------------------------------------------------------------------
    // View assembly
    // ------------------------------------------------------------------

    /// Snapshot of everything the front-end should currently display
    pub fn view(&self) -> TerminalView {
        TerminalView {
            focus: Some(self.focus.clone()),
            chart: self.chart.clone(),
            panels: self.registry.rendered_panels(),
            financial_tab: self.financial_tab.clone(),
            prediction: self.prediction.clone(),
            suggestions: self.search.suggestions(),
        }
    }

    /// Direct registry access for assignment checks
    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }
}

/// Structural email check: local part, one '@', dotted domain. The form
/// only guards against obvious typos; the backend does not verify email
/// at all.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plausible_addresses() {
        assert!(is_valid_email("kees@example.com"));
        assert!(is_valid_email("a.b+c@mail.co.uk"));
    }

    #[test]
    fn email_validation_rejects_malformed_addresses() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("kees@localhost"));
        assert!(!is_valid_email("kees@domain."));
        assert!(!is_valid_email("ke es@example.com"));
    }
}
