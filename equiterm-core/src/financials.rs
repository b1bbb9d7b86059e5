//! Financial metrics tab payloads

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The tabs of the financial-metrics section below the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialSection {
    Ratios,
    Board,
    Ownership,
    Reports,
}

impl FinancialSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialSection::Ratios => "ratios",
            FinancialSection::Board => "board",
            FinancialSection::Ownership => "ownership",
            FinancialSection::Reports => "reports",
        }
    }
}

impl fmt::Display for FinancialSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FinancialSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ratios" => Ok(FinancialSection::Ratios),
            "board" => Ok(FinancialSection::Board),
            "ownership" => Ok(FinancialSection::Ownership),
            "reports" => Ok(FinancialSection::Reports),
            _ => Err(format!("Unknown financial section: {}", s)),
        }
    }
}

/// A company board member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMember {
    pub name: String,
    pub role: String,
}

/// A major shareholder and their stake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipStake {
    pub shareholder: String,
    pub stake: String,
}

/// A published report (annual report, filing, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLink {
    pub title: String,
    pub date: String,
    pub link: String,
}

/// Section-specific financial data as served by `/api/financials/:type`.
///
/// Ratio values are pre-formatted display strings ("23.4", "1.2%", "N/A");
/// the terminal does no numeric processing on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FinancialData {
    Ratios(BTreeMap<String, String>),
    Board(Vec<BoardMember>),
    Ownership(Vec<OwnershipStake>),
    Reports(Vec<ReportLink>),
}

impl FinancialData {
    /// Whether there is anything to render
    pub fn is_empty(&self) -> bool {
        match self {
            FinancialData::Ratios(map) => map.is_empty(),
            FinancialData::Board(rows) => rows.is_empty(),
            FinancialData::Ownership(rows) => rows.is_empty(),
            FinancialData::Reports(rows) => rows.is_empty(),
        }
    }
}
