//! Instrument (focus ticker) definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tradeable instrument, identified by an exchange-qualified symbol
/// (e.g. "NASDAQ:AAPL") plus a human-readable display name.
///
/// The terminal holds exactly one focus instrument at a time; it is
/// overwritten on every selection and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Exchange-qualified symbol, e.g. "NASDAQ:AAPL" or "Euronext:ASML"
    pub symbol_id: String,

    /// Human-readable display name, e.g. "APPLE INC (US)"
    pub display_name: String,
}

impl Instrument {
    pub fn new(symbol_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            display_name: display_name.into(),
        }
    }

    /// The default focus instrument shown before any selection is made
    pub fn default_focus() -> Self {
        Self::new("NASDAQ:AAPL", "APPLE INC (US)")
    }

    /// The bare symbol without the exchange qualifier.
    ///
    /// Upstream data vendors are queried with "AAPL", not "NASDAQ:AAPL".
    pub fn local_symbol(&self) -> &str {
        match self.symbol_id.split_once(':') {
            Some((_, local)) => local,
            None => &self.symbol_id,
        }
    }

    /// The exchange qualifier, if the symbol carries one
    pub fn exchange(&self) -> Option<&str> {
        self.symbol_id.split_once(':').map(|(ex, _)| ex)
    }

    /// Resolve a bare watchlist ticker against the built-in instrument
    /// table. Unknown tickers still render, just without a display name.
    pub fn well_known(ticker: &str) -> Option<Instrument> {
        let (symbol_id, name) = match ticker.to_uppercase().as_str() {
            "SHELL" => ("Euronext:SHELL", "SHELL PLC (AMS)"),
            "ASML" => ("Euronext:ASML", "ASML HOLDING (AMS)"),
            "UNA" => ("Euronext:UNA", "UNILEVER PLC (AMS)"),
            "ING" => ("Euronext:INGA", "ING GROEP (AMS)"),
            "ADIDAS" | "ADS" => ("XETRA:ADS", "ADIDAS AG (GER)"),
            "TSLA" => ("NASDAQ:TSLA", "TESLA INC (US)"),
            "AAPL" => ("NASDAQ:AAPL", "APPLE INC (US)"),
            _ => return None,
        };
        Some(Instrument::new(symbol_id, name))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.symbol_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_symbol_strips_exchange() {
        let inst = Instrument::new("NASDAQ:TSLA", "TESLA INC (US)");
        assert_eq!(inst.local_symbol(), "TSLA");
        assert_eq!(inst.exchange(), Some("NASDAQ"));
    }

    #[test]
    fn local_symbol_without_exchange_is_identity() {
        let inst = Instrument::new("ASML", "ASML HOLDING (AMS)");
        assert_eq!(inst.local_symbol(), "ASML");
        assert_eq!(inst.exchange(), None);
    }

    #[test]
    fn default_focus_is_apple() {
        assert_eq!(Instrument::default_focus().local_symbol(), "AAPL");
    }
}
