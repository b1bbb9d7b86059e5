//! Chart embed configuration
//!
//! The charting widget is a third-party collaborator that consumes a symbol
//! string; the terminal only decides what to initialize it with. Rebuilt
//! from scratch on every instrument selection.

use equiterm_core::Instrument;
use serde::{Deserialize, Serialize};

/// Initialization parameters handed to the embedded charting widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Exchange-qualified symbol, e.g. "NASDAQ:AAPL"
    pub symbol: String,
    /// Candle interval ("D" = daily)
    pub interval: String,
    pub timezone: String,
    pub theme: String,
    pub locale: String,
    pub autosize: bool,
}

impl ChartConfig {
    /// Config for a freshly selected instrument, with the terminal's
    /// standard daily dark-theme setup
    pub fn for_instrument(instrument: &Instrument) -> Self {
        Self {
            symbol: instrument.symbol_id.clone(),
            interval: "D".to_string(),
            timezone: "Europe/Amsterdam".to_string(),
            theme: "dark".to_string(),
            locale: "en".to_string(),
            autosize: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_carries_qualified_symbol() {
        let inst = Instrument::new("Euronext:ASML", "ASML HOLDING (AMS)");
        let config = ChartConfig::for_instrument(&inst);
        assert_eq!(config.symbol, "Euronext:ASML");
        assert_eq!(config.interval, "D");
        assert!(config.autosize);
    }
}
