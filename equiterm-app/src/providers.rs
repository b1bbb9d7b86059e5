//! Content providers
//!
//! One routine per [`ContentType`]. Each fetches (or mocks) its data and
//! produces a [`PanelView`]; failures degrade to an in-panel message and
//! never affect sibling panels. Gated providers consult the auth status
//! BEFORE fetching, so a free-tier account causes no data calls at all.

use std::sync::Arc;

use equiterm_client::Backend;
use equiterm_core::{AuthStatus, ContentType, Instrument};
use tracing::warn;

use crate::view::{PanelView, WatchlistRow};

/// Render the content for one panel assignment.
///
/// `status` is the auth snapshot of the current render cycle; providers do
/// not re-fetch it individually.
pub async fn render_content(
    backend: &Arc<dyn Backend>,
    content: ContentType,
    focus: &Instrument,
    status: &AuthStatus,
) -> PanelView {
    match content {
        ContentType::News => news(backend, focus).await,
        ContentType::Watchlist => watchlist(backend, status).await,
        ContentType::Network => network(status),
        ContentType::Indicators => indicators(backend, status).await,
        ContentType::Sentiment => sentiment(status),
        ContentType::Volatility => volatility(status),
    }
}

async fn news(backend: &Arc<dyn Backend>, focus: &Instrument) -> PanelView {
    match backend.news(Some(focus.local_symbol())).await {
        Ok(items) if items.is_empty() => PanelView::message("No news found."),
        Ok(items) => PanelView::News(items),
        Err(e) => {
            warn!("News panel degraded: {}", e);
            PanelView::message("Error loading news.")
        }
    }
}

async fn watchlist(backend: &Arc<dyn Backend>, status: &AuthStatus) -> PanelView {
    if !status.logged_in {
        return PanelView::LoginRequired("Please log in to view your watchlist.".to_string());
    }

    match backend.watchlist().await {
        Ok(tickers) if tickers.is_empty() => PanelView::Watchlist(Vec::new()),
        Ok(tickers) => {
            let rows = tickers
                .into_iter()
                .map(|ticker| {
                    let name = Instrument::well_known(&ticker).map(|i| i.display_name);
                    WatchlistRow { ticker, name }
                })
                .collect();
            PanelView::Watchlist(rows)
        }
        Err(e) => {
            warn!("Watchlist panel degraded: {}", e);
            PanelView::message("Error loading watchlist.")
        }
    }
}

/// Free users get the teaser with an upgrade prompt; the graph itself
/// activates with premium. No backend data behind this yet.
fn network(status: &AuthStatus) -> PanelView {
    PanelView::Network {
        active: status.is_premium,
    }
}

async fn indicators(backend: &Arc<dyn Backend>, status: &AuthStatus) -> PanelView {
    if !status.is_premium {
        return PanelView::locked("Unlock Indicators", "Upgrade to see correlation data.");
    }

    match backend.leading_indicators().await {
        Ok(list) if list.is_empty() => PanelView::message("No indicator data."),
        Ok(list) => PanelView::Indicators(list),
        Err(e) => {
            warn!("Indicators panel degraded: {}", e);
            PanelView::message("Error loading indicators.")
        }
    }
}

fn sentiment(status: &AuthStatus) -> PanelView {
    if !status.is_premium {
        return PanelView::locked("Unlock Sentiment", "Upgrade needed.");
    }
    PanelView::Sentiment("Sentiment analysis active.".to_string())
}

fn volatility(status: &AuthStatus) -> PanelView {
    if !status.is_premium {
        return PanelView::locked("Unlock Volatility", "Upgrade needed.");
    }
    PanelView::Volatility("Volatility tracking active.".to_string())
}
