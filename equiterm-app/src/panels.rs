//! Panel registry and render dispatch
//!
//! Maps each panel slot to its selected content type and renders that
//! content into the slot. Assignments are independent; re-rendering one
//! slot never touches the other.

use std::collections::HashMap;
use std::sync::Arc;

use equiterm_client::Backend;
use equiterm_core::{AuthStatus, ContentType, Instrument, PanelId};
use tracing::{debug, info};

use crate::providers;
use crate::view::{PanelState, PanelView};

/// Registry of panel assignments plus their rendered states
pub struct PanelRegistry {
    assignments: HashMap<PanelId, ContentType>,
    states: HashMap<PanelId, PanelState>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self {
            assignments: HashMap::new(),
            states: HashMap::new(),
        }
    }

    /// The content type currently assigned to a slot
    pub fn assignment(&self, panel: PanelId) -> Option<ContentType> {
        self.assignments.get(&panel).copied()
    }

    /// All slots currently assigned the given content type, in display order
    pub fn panels_showing(&self, content: ContentType) -> Vec<PanelId> {
        PanelId::ALL
            .into_iter()
            .filter(|panel| self.assignments.get(panel) == Some(&content))
            .collect()
    }

    /// Rendered state of a slot, if it has been rendered at least once
    pub fn state(&self, panel: PanelId) -> Option<&PanelState> {
        self.states.get(&panel)
    }

    /// Rendered states of both slots in display order (for view assembly)
    pub fn rendered_panels(&self) -> Vec<PanelState> {
        PanelId::ALL
            .into_iter()
            .filter_map(|panel| self.states.get(&panel).cloned())
            .collect()
    }

    /// Render the "module not available" fallback into a slot.
    ///
    /// Used when the selector value does not parse to a known content type;
    /// the previous assignment is left untouched and no backend call is
    /// made on this path.
    pub fn set_unavailable(&mut self, panel: PanelId, requested: &str) {
        info!("Panel {} asked for unknown content '{}'", panel, requested);
        self.states
            .insert(panel, PanelState::new("Module", PanelView::Unavailable));
    }

    /// Assign a content type to a slot and render it.
    ///
    /// Re-invoking with the current assignment is allowed and always
    /// re-fetches; panel content is cheap to regenerate and freshness
    /// matters. The loading placeholder goes up synchronously, before the
    /// provider is awaited.
    pub async fn assign_and_render(
        &mut self,
        backend: &Arc<dyn Backend>,
        focus: &Instrument,
        status: &AuthStatus,
        panel: PanelId,
        content: ContentType,
    ) {
        debug!("Panel {} -> {}", panel, content);
        self.assignments.insert(panel, content);

        self.states
            .insert(panel, PanelState::new(content.title(), PanelView::Loading));

        let body = providers::render_content(backend, content, focus, status).await;
        self.states
            .insert(panel, PanelState::new(content.title(), body));
    }

    /// Re-render a slot with its existing assignment (no-op for slots that
    /// were never assigned)
    pub async fn refresh(
        &mut self,
        backend: &Arc<dyn Backend>,
        focus: &Instrument,
        status: &AuthStatus,
        panel: PanelId,
    ) {
        if let Some(content) = self.assignment(panel) {
            self.assign_and_render(backend, focus, status, panel, content)
                .await;
        }
    }

    /// Restore assignments without rendering (used before the first render
    /// when a persisted snapshot exists)
    pub fn restore_assignments(&mut self, panel1: ContentType, panel2: ContentType) {
        self.assignments.insert(PanelId::Panel1, panel1);
        self.assignments.insert(PanelId::Panel2, panel2);
    }
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
