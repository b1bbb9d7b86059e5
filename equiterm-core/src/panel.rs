//! Panel slot and content-type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two user-configurable panel slots on the right of the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelId {
    #[serde(rename = "panel-1")]
    Panel1,
    #[serde(rename = "panel-2")]
    Panel2,
}

impl PanelId {
    /// All panel slots, in display order
    pub const ALL: [PanelId; 2] = [PanelId::Panel1, PanelId::Panel2];

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelId::Panel1 => "panel-1",
            PanelId::Panel2 => "panel-2",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content a panel slot can be assigned to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    News,
    Watchlist,
    Network,
    Indicators,
    Sentiment,
    Volatility,
}

impl ContentType {
    /// Panel header shown above the content
    pub fn title(&self) -> &'static str {
        match self {
            ContentType::News => "Realtime News",
            ContentType::Watchlist => "Watchlist",
            ContentType::Network => "Corporate Network",
            ContentType::Indicators => "Leading Indicators",
            ContentType::Sentiment => "Sentiment",
            ContentType::Volatility => "Volatility",
        }
    }

    /// Whether this content requires a premium subscription
    pub fn premium_gated(&self) -> bool {
        matches!(
            self,
            ContentType::Indicators | ContentType::Sentiment | ContentType::Volatility
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::News => "news",
            ContentType::Watchlist => "watchlist",
            ContentType::Network => "network",
            ContentType::Indicators => "indicators",
            ContentType::Sentiment => "sentiment",
            ContentType::Volatility => "volatility",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "news" => Ok(ContentType::News),
            "watchlist" => Ok(ContentType::Watchlist),
            "network" => Ok(ContentType::Network),
            "indicators" => Ok(ContentType::Indicators),
            "sentiment" => Ok(ContentType::Sentiment),
            "volatility" => Ok(ContentType::Volatility),
            _ => Err(format!("Unknown content type: {}", s)),
        }
    }
}

/// A panel slot together with its currently selected content type.
///
/// Assignments are independent: changing one panel never affects the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelAssignment {
    pub panel: PanelId,
    pub content: ContentType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn content_type_round_trips_through_str() {
        for ct in [
            ContentType::News,
            ContentType::Watchlist,
            ContentType::Network,
            ContentType::Indicators,
            ContentType::Sentiment,
            ContentType::Volatility,
        ] {
            assert_eq!(ContentType::from_str(ct.as_str()), Ok(ct));
        }
    }

    #[test]
    fn unknown_content_type_is_rejected() {
        assert!(ContentType::from_str("heatmap").is_err());
        assert!(ContentType::from_str("").is_err());
    }

    #[test]
    fn gating_matches_upsell_panels() {
        assert!(!ContentType::News.premium_gated());
        assert!(!ContentType::Watchlist.premium_gated());
        assert!(!ContentType::Network.premium_gated());
        assert!(ContentType::Indicators.premium_gated());
        assert!(ContentType::Sentiment.premium_gated());
        assert!(ContentType::Volatility.premium_gated());
    }
}
