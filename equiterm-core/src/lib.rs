//! Core types for the Equiterm stock terminal
//!
//! This crate defines the shared data structures used across the terminal,
//! including instruments, panel assignments, auth status and the data
//! payloads served by the backend API.

pub mod auth;
pub mod error;
pub mod financials;
pub mod instrument;
pub mod market_data;
pub mod panel;

pub use auth::{AuthStatus, Credentials};
pub use error::{TerminalError, TerminalResult};
pub use financials::{
    BoardMember, FinancialData, FinancialSection, OwnershipStake, ReportLink,
};
pub use instrument::Instrument;
pub use market_data::{LeadingIndicator, NewsItem, Prediction, SearchSuggestion};
pub use panel::{ContentType, PanelAssignment, PanelId};
