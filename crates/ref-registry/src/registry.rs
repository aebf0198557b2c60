use page_model::{Document, Element, WeakElement};
use refscope_core_types::{ElementRef, RefScopeError};
use tracing::debug;

struct RegistryEntry {
    reference: ElementRef,
    handle: WeakElement,
}

/// In-memory table of `ref_N` → weak element handle for one page
/// lifetime. All mutation happens through the three operations below;
/// every mutation completes before control returns to page script.
#[derive(Default)]
pub struct ReferenceRegistry {
    entries: Vec<RegistryEntry>,
    counter: u64,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing reference for `element` when one of the
    /// live entries already points at it; otherwise mints the next
    /// `ref_N` and stores a weak handle.
    ///
    /// The scan over existing entries is what makes identity stable
    /// across snapshots: a reference is allocated once per live element
    /// and reused for as long as the element stays reachable.
    pub fn allocate_or_reuse(&mut self, element: &Element) -> ElementRef {
        for entry in &self.entries {
            if let Some(live) = entry.handle.upgrade() {
                if live.ptr_eq(element) {
                    return entry.reference.clone();
                }
            }
        }
        self.counter += 1;
        let reference = ElementRef::from_index(self.counter);
        debug!(reference = %reference, tag = %element.tag(), "allocated element reference");
        self.entries.push(RegistryEntry {
            reference: reference.clone(),
            handle: element.downgrade(),
        });
        reference
    }

    /// Resolves a reference to its live element. An absent entry, a
    /// dead weak handle, or a detached element all report stale; the
    /// entry, if present, is deleted on the way out.
    pub fn resolve(
        &mut self,
        reference: &ElementRef,
        document: &Document,
    ) -> Result<Element, RefScopeError> {
        let position = self
            .entries
            .iter()
            .position(|entry| &entry.reference == reference);
        let Some(position) = position else {
            return Err(RefScopeError::stale(reference.as_str()));
        };

        let live = self.entries[position]
            .handle
            .upgrade()
            .filter(|el| document.is_attached(el));
        match live {
            Some(element) => Ok(element),
            None => {
                self.entries.remove(position);
                debug!(reference = %reference, "purged stale entry on failed resolution");
                Err(RefScopeError::stale(reference.as_str()))
            }
        }
    }

    /// Drops every entry whose handle no longer resolves to a live,
    /// attached element. Returns the number of entries purged.
    pub fn garbage_collect(&mut self, document: &Document) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| {
            entry
                .handle
                .upgrade()
                .is_some_and(|el| document.is_attached(&el))
        });
        let purged = before - self.entries.len();
        if purged > 0 {
            debug!(purged, remaining = self.entries.len(), "garbage collected registry");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, reference: &ElementRef) -> bool {
        self.entries
            .iter()
            .any(|entry| &entry.reference == reference)
    }
}

#[cfg(test)]
mod tests {
    use page_model::Document;
    use refscope_core_types::Viewport;

    use super::*;

    fn doc() -> Document {
        Document::new(Viewport::new(800.0, 600.0))
    }

    #[test]
    fn references_are_monotonic_and_stable() {
        let doc = doc();
        let a = Element::new("button");
        let b = Element::new("a");
        doc.body().append_child(&a);
        doc.body().append_child(&b);

        let mut registry = ReferenceRegistry::new();
        let ref_a = registry.allocate_or_reuse(&a);
        let ref_b = registry.allocate_or_reuse(&b);
        assert_eq!(ref_a.as_str(), "ref_1");
        assert_eq!(ref_b.as_str(), "ref_2");
        // Second pass reuses, never re-mints.
        assert_eq!(registry.allocate_or_reuse(&a), ref_a);
        assert_eq!(registry.allocate_or_reuse(&b), ref_b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn resolve_reports_stale_for_detached_element() {
        let doc = doc();
        let el = Element::new("div");
        doc.body().append_child(&el);

        let mut registry = ReferenceRegistry::new();
        let reference = registry.allocate_or_reuse(&el);
        assert!(registry.resolve(&reference, &doc).is_ok());

        el.detach();
        let err = registry.resolve(&reference, &doc).unwrap_err();
        assert!(matches!(err, RefScopeError::StaleReference { .. }));
        // Failed resolution purged the entry.
        assert!(!registry.contains(&reference));
    }

    #[test]
    fn resolve_unknown_reference_is_stale_not_panic() {
        let doc = doc();
        let mut registry = ReferenceRegistry::new();
        let reference = ElementRef::from_index(42);
        assert!(registry.resolve(&reference, &doc).is_err());
    }

    #[test]
    fn garbage_collect_drops_dead_and_detached() {
        let doc = doc();
        let kept = Element::new("button");
        doc.body().append_child(&kept);
        let detached = Element::new("div");
        doc.body().append_child(&detached);

        let mut registry = ReferenceRegistry::new();
        registry.allocate_or_reuse(&kept);
        registry.allocate_or_reuse(&detached);
        {
            let dropped = Element::new("span");
            doc.body().append_child(&dropped);
            registry.allocate_or_reuse(&dropped);
            dropped.detach();
        }
        detached.detach();

        assert_eq!(registry.garbage_collect(&doc), 2);
        assert_eq!(registry.len(), 1);
    }
}
