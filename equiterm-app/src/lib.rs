//! Panel content controller for the Equiterm terminal
//!
//! This crate owns every piece of UI state the terminal displays: the focus
//! instrument, the two content panels, the financial tab, the chart embed
//! and the search suggestion list. All of it hangs off an explicitly passed
//! [`TerminalController`]; there are no module-level globals.

pub mod chart;
pub mod controller;
pub mod panels;
pub mod persistence;
pub mod providers;
pub mod search;
pub mod session;
pub mod view;

pub use chart::ChartConfig;
pub use controller::{AuthFlowResult, TerminalController};
pub use panels::PanelRegistry;
pub use persistence::{SessionSnapshot, SnapshotStore};
pub use search::SearchDebouncer;
pub use session::AuthGate;
pub use view::{FinancialTabView, PanelView, TerminalView, WatchlistRow};
