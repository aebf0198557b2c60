use refscope_core_types::PageId;
use tracing::debug;

use crate::registry::ReferenceRegistry;

/// Explicit page-scoped context passed to every operation.
///
/// The registry and its counter are per-page state: created on first
/// use, reset on navigation. Nothing here is a process-wide singleton,
/// so two pages never share reference ids.
pub struct PageSession {
    page: PageId,
    pub registry: ReferenceRegistry,
}

impl PageSession {
    pub fn new() -> Self {
        Self {
            page: PageId::new(),
            registry: ReferenceRegistry::new(),
        }
    }

    pub fn page_id(&self) -> &PageId {
        &self.page
    }

    /// Clears every entry and restarts the counter; reference ids for
    /// the new document start over at `ref_1`.
    pub fn reset_for_navigation(&mut self) {
        debug!(page = %self.page, dropped = self.registry.len(), "reset registry for navigation");
        self.registry = ReferenceRegistry::new();
    }
}

impl Default for PageSession {
    fn default() -> Self {
        Self::new()
    }
}
