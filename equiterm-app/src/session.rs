//! Auth gate
//!
//! Every gated content provider asks this for the current session status
//! before deciding between real content and an upsell placeholder. Status
//! is fetched fresh per render cycle and never cached across cycles.

use std::sync::Arc;

use equiterm_client::Backend;
use equiterm_core::AuthStatus;

/// Capability check in front of premium-gated content
#[derive(Clone)]
pub struct AuthGate {
    backend: Arc<dyn Backend>,
}

impl AuthGate {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Current session status; fails open to guest (the backend client
    /// already degrades transport failures)
    pub async fn status(&self) -> AuthStatus {
        self.backend.status().await
    }
}
