use page_model::{Document, Element, ScrollBehavior};
use refscope_core_types::{ActionFailure, ElementRef};
use refscope_registry::PageSession;
use tracing::{debug, instrument, warn};

use crate::types::{ElementAttributes, LocateOutcome, LocatedElement};

const TEXT_SNAPSHOT_CAP: usize = 100;

/// Shared resolution step for every ref-consuming operation: resolves
/// through the registry and maps a stale reference to the uniform
/// failure envelope for the named action.
pub fn resolve_target(
    document: &Document,
    session: &mut PageSession,
    reference: &ElementRef,
    action: &str,
) -> Result<Element, ActionFailure> {
    session
        .registry
        .resolve(reference, document)
        .map_err(|err| {
            warn!(reference = %reference, action, "reference no longer resolves");
            ActionFailure::new(action, err.to_string())
        })
}

/// Resolves a reference and reports the element's geometry and
/// interactability. Scrolls instantly to center first and forces a
/// layout flush, so the returned center point survives sticky overlays
/// and is immediately clickable. Never returns an error: a stale
/// reference produces a structured failure naming it.
#[instrument(skip(document, session), fields(reference = %reference))]
pub fn locate(
    document: &Document,
    session: &mut PageSession,
    reference: &ElementRef,
) -> LocateOutcome {
    let element = match resolve_target(document, session, reference, "locate") {
        Ok(element) => element,
        Err(failure) => return LocateOutcome::NotFound(failure),
    };

    document.scroll_element_into_view(&element, ScrollBehavior::Instant);
    document.flush_layout();

    let rect = document.bounding_client_rect(&element);
    let style = element.style();
    let is_visible = !rect.is_empty();
    let is_interactable =
        !element.has_attribute("disabled") && !style.display_none && !style.visibility_hidden;

    debug!(descriptor = %descriptor(&element), is_visible, is_interactable, "located element");
    LocateOutcome::Found(LocatedElement {
        success: true,
        reference: reference.clone(),
        point: rect.center(),
        descriptor: descriptor(&element),
        attributes: attribute_snapshot(&element),
        rect,
        is_visible,
        is_interactable,
    })
}

/// `tag#id.class1.class2`, omitting missing parts.
fn descriptor(element: &Element) -> String {
    let mut out = element.tag();
    if let Some(id) = element.id() {
        out.push('#');
        out.push_str(&id);
    }
    for class in element.classes() {
        out.push('.');
        out.push_str(&class);
    }
    out
}

fn attribute_snapshot(element: &Element) -> ElementAttributes {
    let text = {
        let collapsed = element
            .text_content()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed.chars().take(TEXT_SNAPSHOT_CAP).collect())
        }
    };
    ElementAttributes {
        control_type: element.attribute("type"),
        role: element.attribute("role"),
        aria_label: element.attribute("aria-label"),
        text,
    }
}
