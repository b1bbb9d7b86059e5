//! Typed render model
//!
//! Content providers produce [`PanelView`] values instead of markup, so the
//! whole render cycle can be asserted on without a live front-end. A thin
//! rendering layer (web, TUI) turns these into actual output.

use equiterm_core::{FinancialData, Instrument, LeadingIndicator, NewsItem, SearchSuggestion};
use serde::{Deserialize, Serialize};

use crate::chart::ChartConfig;

/// One row of a rendered watchlist panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistRow {
    /// Bare ticker as stored by the backend
    pub ticker: String,
    /// Display name when the ticker resolves to a known instrument
    pub name: Option<String>,
}

/// What a panel slot currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelView {
    /// Synchronous placeholder while a provider is in flight
    Loading,
    /// Static plain-text message (errors, empty states)
    Message(String),
    /// Upsell placeholder for premium-gated content; renders identically
    /// regardless of which panel invoked it
    Locked { title: String, description: String },
    /// Prompt to log in before the content can be shown
    LoginRequired(String),
    /// Fallback for an unrecognized content type
    Unavailable,
    News(Vec<NewsItem>),
    Watchlist(Vec<WatchlistRow>),
    Indicators(Vec<LeadingIndicator>),
    Network { active: bool },
    Sentiment(String),
    Volatility(String),
}

impl PanelView {
    /// Upsell placeholder with the standard wording
    pub fn locked(title: impl Into<String>, description: impl Into<String>) -> Self {
        PanelView::Locked {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        PanelView::Message(text.into())
    }

    /// Whether this view is a degraded state rather than real content
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            PanelView::Message(_)
                | PanelView::Locked { .. }
                | PanelView::LoginRequired(_)
                | PanelView::Unavailable
        )
    }
}

/// Rendered state of one panel slot: header title plus body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub title: String,
    pub body: PanelView,
}

impl PanelState {
    pub fn new(title: impl Into<String>, body: PanelView) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }
}

/// Rendered state of the financial-metrics tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinancialTabView {
    Loading,
    Message(String),
    Data(FinancialData),
}

/// The complete visible state of the terminal.
///
/// A selection event mutates parts of this in place; nothing outside the
/// controller writes to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminalView {
    /// Focus instrument header
    pub focus: Option<Instrument>,
    /// Chart widget configuration for the focus instrument
    pub chart: Option<ChartConfig>,
    /// Right-hand panel slots, in display order
    pub panels: Vec<PanelState>,
    /// Financial tab below the chart
    pub financial_tab: Option<FinancialTabView>,
    /// AI prediction text (premium) or its upsell message
    pub prediction: Option<String>,
    /// Search suggestion dropdown; empty means hidden
    pub suggestions: Vec<SearchSuggestion>,
}
