//! End-to-end controller behavior against a scripted backend

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use equiterm_app::{AuthFlowResult, PanelView, SearchDebouncer, TerminalController};
use equiterm_client::{Backend, SessionOutcome};
use equiterm_core::{
    AuthStatus, ContentType, Credentials, FinancialData, FinancialSection, LeadingIndicator,
    NewsItem, PanelId, SearchSuggestion, TerminalResult,
};
use parking_lot::Mutex;
use rust_decimal_macros::dec;

/// Scripted backend that records every data call it receives
#[derive(Default)]
struct MockBackend {
    status: Mutex<AuthStatus>,
    watchlist: Mutex<Vec<String>>,
    /// Every data-fetch hit, e.g. "news:TSLA", "watchlist", "search:asml"
    calls: Mutex<Vec<String>>,
}

impl MockBackend {
    fn new(status: AuthStatus) -> Self {
        Self {
            status: Mutex::new(status),
            ..Default::default()
        }
    }

    fn logged_in_free() -> Self {
        Self::new(AuthStatus {
            logged_in: true,
            is_premium: false,
            username: "kees".to_string(),
        })
    }

    fn logged_in_premium() -> Self {
        Self::new(AuthStatus {
            logged_in: true,
            is_premium: true,
            username: "kees".to_string(),
        })
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn calls_matching(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn status(&self) -> AuthStatus {
        self.status.lock().clone()
    }

    async fn register(&self, _credentials: &Credentials) -> TerminalResult<SessionOutcome> {
        Ok(SessionOutcome::Established)
    }

    async fn login(&self, credentials: &Credentials) -> TerminalResult<SessionOutcome> {
        if credentials.password == "letmein12" {
            self.status.lock().logged_in = true;
            Ok(SessionOutcome::Established)
        } else {
            Ok(SessionOutcome::Rejected("Login failed.".to_string()))
        }
    }

    async fn logout(&self) -> TerminalResult<()> {
        *self.status.lock() = AuthStatus::guest();
        Ok(())
    }

    async fn watchlist(&self) -> TerminalResult<Vec<String>> {
        self.record("watchlist");
        Ok(self.watchlist.lock().clone())
    }

    async fn add_to_watchlist(&self, ticker: &str) -> TerminalResult<String> {
        self.watchlist.lock().push(ticker.to_string());
        Ok("Added.".to_string())
    }

    async fn remove_from_watchlist(&self, ticker: &str) -> TerminalResult<String> {
        self.watchlist.lock().retain(|t| t != ticker);
        Ok("Removed.".to_string())
    }

    async fn news(&self, ticker: Option<&str>) -> TerminalResult<Vec<NewsItem>> {
        self.record(format!("news:{}", ticker.unwrap_or("market")));
        Ok(vec![NewsItem {
            title: "Quarterly results ahead of expectations".to_string(),
            source: "Reuters".to_string(),
            time: "09:15".to_string(),
            url: None,
            important: false,
        }])
    }

    async fn leading_indicators(&self) -> TerminalResult<Vec<LeadingIndicator>> {
        self.record("indicators");
        Ok(vec![LeadingIndicator {
            name: "Sector Momentum".to_string(),
            correlation: dec!(0.85),
            impact: Some("High".to_string()),
            change: Some("+2.1%".to_string()),
        }])
    }

    async fn financials(
        &self,
        section: FinancialSection,
        ticker: &str,
    ) -> TerminalResult<FinancialData> {
        self.record(format!("financials:{}:{}", section, ticker));
        let mut ratios = std::collections::BTreeMap::new();
        ratios.insert("P/E Ratio".to_string(), "28.1".to_string());
        Ok(FinancialData::Ratios(ratios))
    }

    async fn ai_prediction(&self, ticker: &str) -> TerminalResult<String> {
        self.record(format!("prediction:{}", ticker));
        Ok(format!("Strong buy signal for {}.", ticker))
    }

    async fn search(&self, query: &str) -> TerminalResult<Vec<SearchSuggestion>> {
        self.record(format!("search:{}", query));
        Ok(vec![SearchSuggestion {
            symbol: "ASML".to_string(),
            display_symbol: "Euronext:ASML".to_string(),
            description: "ASML HOLDING (AMS)".to_string(),
        }])
    }

    async fn create_checkout_session(&self) -> TerminalResult<()> {
        self.status.lock().is_premium = true;
        Ok(())
    }

    async fn customer_portal(&self) -> TerminalResult<String> {
        Ok("https://billing.example.com/portal".to_string())
    }
}

fn controller_with(backend: &Arc<MockBackend>, dir: &tempfile::TempDir) -> TerminalController {
    let backend: Arc<dyn Backend> = Arc::clone(backend) as Arc<dyn Backend>;
    TerminalController::new(backend, dir.path().join("session.json"))
}

fn panel_body(controller: &TerminalController, panel: PanelId) -> PanelView {
    controller
        .registry()
        .state(panel)
        .expect("panel rendered")
        .body
        .clone()
}

#[tokio::test]
async fn unknown_content_type_renders_fallback_without_backend_calls() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);

    controller
        .set_panel_content(PanelId::Panel1, "heatmap")
        .await;

    assert_eq!(panel_body(&controller, PanelId::Panel1), PanelView::Unavailable);
    assert!(backend.calls().is_empty(), "calls: {:?}", backend.calls());
}

#[tokio::test]
async fn unknown_content_type_keeps_previous_assignment() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);

    controller.set_panel_content(PanelId::Panel1, "news").await;
    controller
        .set_panel_content(PanelId::Panel1, "bogus")
        .await;

    assert_eq!(
        controller.registry().assignment(PanelId::Panel1),
        Some(ContentType::News)
    );
}

#[tokio::test]
async fn selecting_instrument_updates_focus_before_fanout_renders() {
    let backend = Arc::new(MockBackend::logged_in_premium());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);
    controller.init().await;
    backend.clear_calls();

    controller
        .select_instrument("NASDAQ:TSLA".to_string(), "TESLA INC (US)".to_string())
        .await;

    assert_eq!(controller.focus().local_symbol(), "TSLA");

    // Every fetch issued by the fan-out saw the new instrument; none read
    // the previous AAPL focus.
    let calls = backend.calls();
    assert!(!calls.is_empty());
    for call in &calls {
        assert!(
            !call.contains("AAPL"),
            "render read stale focus: {:?}",
            calls
        );
    }
    assert_eq!(backend.calls_matching("news:TSLA"), 1);
    assert_eq!(backend.calls_matching("financials:ratios:TSLA"), 1);
    assert_eq!(backend.calls_matching("prediction:TSLA"), 1);
}

#[tokio::test]
async fn selection_rebuilds_chart_and_clears_suggestions() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);
    controller.init().await;

    controller
        .select_instrument("Euronext:ASML".to_string(), "ASML HOLDING (AMS)".to_string())
        .await;

    let view = controller.view();
    assert_eq!(view.chart.unwrap().symbol, "Euronext:ASML");
    assert!(view.suggestions.is_empty());
}

#[tokio::test]
async fn debounced_search_fires_once_for_the_final_text() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let backend_dyn: Arc<dyn Backend> = Arc::clone(&backend) as Arc<dyn Backend>;
    let mut search = SearchDebouncer::with_window(backend_dyn, Duration::from_millis(80));

    // Three keystrokes inside one quiet window
    search.on_input("as");
    tokio::time::sleep(Duration::from_millis(20)).await;
    search.on_input("asm");
    tokio::time::sleep(Duration::from_millis(20)).await;
    search.on_input("asml");

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(backend.calls(), vec!["search:asml".to_string()]);
    assert_eq!(search.suggestions().len(), 1);
}

#[tokio::test]
async fn short_search_input_hides_suggestions_and_schedules_nothing() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let backend_dyn: Arc<dyn Backend> = Arc::clone(&backend) as Arc<dyn Backend>;
    let mut search = SearchDebouncer::with_window(backend_dyn, Duration::from_millis(40));

    search.on_input("asml");
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(search.suggestions().len(), 1);

    // Backspacing below the minimum hides the list immediately
    search.on_input("a");
    assert!(search.suggestions().is_empty());

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(backend.calls(), vec!["search:asml".to_string()]);
}

#[tokio::test]
async fn free_tier_gets_locked_views_and_no_data_fetches() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);

    for (panel, content) in [
        (PanelId::Panel1, "indicators"),
        (PanelId::Panel2, "sentiment"),
    ] {
        controller.set_panel_content(panel, content).await;
    }

    assert!(matches!(
        panel_body(&controller, PanelId::Panel1),
        PanelView::Locked { .. }
    ));
    assert!(matches!(
        panel_body(&controller, PanelId::Panel2),
        PanelView::Locked { .. }
    ));
    assert_eq!(backend.calls_matching("indicators"), 0);

    controller
        .set_panel_content(PanelId::Panel2, "volatility")
        .await;
    assert!(matches!(
        panel_body(&controller, PanelId::Panel2),
        PanelView::Locked { .. }
    ));
    assert!(backend.calls().is_empty(), "calls: {:?}", backend.calls());
}

#[tokio::test]
async fn premium_unlocks_indicator_data() {
    let backend = Arc::new(MockBackend::logged_in_premium());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);

    controller
        .set_panel_content(PanelId::Panel1, "indicators")
        .await;

    match panel_body(&controller, PanelId::Panel1) {
        PanelView::Indicators(list) => assert_eq!(list[0].name, "Sector Momentum"),
        other => panic!("expected indicators, got {:?}", other),
    }
    assert_eq!(backend.calls_matching("indicators"), 1);
}

#[tokio::test]
async fn watchlist_requires_login_and_skips_the_fetch() {
    let backend = Arc::new(MockBackend::new(AuthStatus::guest()));
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);

    controller
        .set_panel_content(PanelId::Panel1, "watchlist")
        .await;

    assert!(matches!(
        panel_body(&controller, PanelId::Panel1),
        PanelView::LoginRequired(_)
    ));
    assert_eq!(backend.calls_matching("watchlist"), 0);
}

#[tokio::test]
async fn watchlist_removal_refreshes_only_watchlist_panels() {
    let backend = Arc::new(MockBackend::logged_in_free());
    backend.watchlist.lock().push("ASML".to_string());
    backend.watchlist.lock().push("TSLA".to_string());

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);
    controller
        .set_panel_content(PanelId::Panel1, "watchlist")
        .await;
    controller.set_panel_content(PanelId::Panel2, "news").await;
    backend.clear_calls();

    let message = controller.remove_from_watchlist("ASML").await.unwrap();
    assert_eq!(message, "Removed.");

    // The watchlist panel re-fetched; the news panel did not.
    assert_eq!(backend.calls_matching("watchlist"), 1);
    assert_eq!(backend.calls_matching("news"), 0);

    match panel_body(&controller, PanelId::Panel1) {
        PanelView::Watchlist(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].ticker, "TSLA");
            assert_eq!(rows[0].name.as_deref(), Some("TESLA INC (US)"));
        }
        other => panic!("expected watchlist, got {:?}", other),
    }
}

#[tokio::test]
async fn watchlist_mutation_with_no_watchlist_panels_refreshes_nothing() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);
    controller.set_panel_content(PanelId::Panel1, "news").await;
    backend.clear_calls();

    controller.add_focus_to_watchlist().await.unwrap();

    assert_eq!(backend.calls_matching("watchlist"), 0);
    assert_eq!(backend.calls_matching("news"), 0);
}

#[tokio::test]
async fn login_persists_snapshot_and_restores_it_after_reload() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let dir = tempfile::tempdir().unwrap();

    {
        let mut controller = controller_with(&backend, &dir);
        controller.init().await;
        controller
            .select_instrument("Euronext:SHELL".to_string(), "SHELL PLC (AMS)".to_string())
            .await;
        controller
            .set_panel_content(PanelId::Panel1, "watchlist")
            .await;
        controller
            .set_panel_content(PanelId::Panel2, "indicators")
            .await;

        let result = controller.login("kees", "letmein12").await.unwrap();
        assert_eq!(result, AuthFlowResult::ReloadRequired);
    }

    // Fresh controller, as after the forced page reload
    let mut controller = controller_with(&backend, &dir);
    controller.init().await;

    assert_eq!(controller.focus().symbol_id, "Euronext:SHELL");
    assert_eq!(
        controller.registry().assignment(PanelId::Panel1),
        Some(ContentType::Watchlist)
    );
    assert_eq!(
        controller.registry().assignment(PanelId::Panel2),
        Some(ContentType::Indicators)
    );
}

#[tokio::test]
async fn first_run_applies_hardcoded_defaults() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);
    controller.init().await;

    assert_eq!(controller.focus().symbol_id, "NASDAQ:AAPL");
    assert_eq!(
        controller.registry().assignment(PanelId::Panel1),
        Some(ContentType::News)
    );
    assert_eq!(
        controller.registry().assignment(PanelId::Panel2),
        Some(ContentType::Network)
    );
}

#[tokio::test]
async fn rejected_login_does_not_force_a_reload() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);

    let result = controller.login("kees", "wrong").await.unwrap();
    assert_eq!(
        result,
        AuthFlowResult::Rejected("Login failed.".to_string())
    );
}

#[tokio::test]
async fn registration_validation_rejects_locally_without_backend_call() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);

    for (user, email, password) in [
        ("", "kees@example.com", "letmein12"),
        ("kees", "not-an-email", "letmein12"),
        ("kees", "kees@example.com", "short"),
    ] {
        let result = controller.register(user, email, password).await.unwrap();
        assert_eq!(result, AuthFlowResult::Rejected("Invalid input.".to_string()));
    }
}

#[tokio::test]
async fn picking_a_suggestion_selects_that_instrument() {
    let backend = Arc::new(MockBackend::logged_in_free());
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_with(&backend, &dir);
    controller.init().await;

    controller
        .pick_suggestion(SearchSuggestion {
            symbol: "ASML".to_string(),
            display_symbol: "Euronext:ASML".to_string(),
            description: "ASML HOLDING (AMS)".to_string(),
        })
        .await;

    assert_eq!(controller.focus().symbol_id, "Euronext:ASML");
    assert_eq!(controller.focus().local_symbol(), "ASML");
}
