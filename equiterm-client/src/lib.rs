//! Typed client for the Equiterm backend REST API
//!
//! Wraps every `/api` endpoint the terminal consumes in an async method
//! returning core types, and exposes the [`Backend`] trait so the panel
//! controller can be driven by a mock in tests.

pub mod backend;
pub mod client;
pub mod types;

pub use backend::Backend;
pub use client::BackendClient;
pub use types::{AckResponse, SessionOutcome};
