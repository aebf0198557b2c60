use page_model::{Document, Element};
use refscope_core_types::RefScopeError;
use refscope_registry::PageSession;
use tracing::{debug, instrument};

use crate::errors::SnapshotError;
use crate::judges;
use crate::model::{LineRecord, Snapshot, SnapshotFilter};
use crate::name;
use crate::roles;

/// Depth budget for a snapshot pass. Only included nodes consume it;
/// excluded wrappers are transparent, so interactive descendants buried
/// in layout divs are still reached.
pub const MAX_TRAVERSAL_DEPTH: usize = 15;

/// Walks the visible document depth-first and serializes one line per
/// included node. Allocates or reuses a reference for every included
/// node and runs one registry garbage-collection sweep at the end.
///
/// The root is always included, so output is never empty. Any page
/// fault during traversal or style computation aborts the pass with a
/// single wrapped traversal error; no partial tree is returned.
#[instrument(skip(document, session), fields(filter = filter.as_str()))]
pub fn generate_snapshot(
    document: &Document,
    session: &mut PageSession,
    filter: SnapshotFilter,
) -> Result<Snapshot, SnapshotError> {
    let mut lines = Vec::new();
    let root = document.root();
    let reference = session.registry.allocate_or_reuse(&root);
    lines.push(LineRecord {
        depth: 0,
        role: roles::derive_role(&root),
        name: name::derive_name(document, &root),
        reference,
        attrs: line_attrs(&root),
        is_root: true,
    });
    for child in root.children() {
        walk(document, session, &child, 1, filter, &mut lines)?;
    }

    let purged = session.registry.garbage_collect(document);
    debug!(
        lines = lines.len(),
        purged,
        registry = session.registry.len(),
        "snapshot pass complete"
    );

    let content = lines
        .iter()
        .filter(|record| !record.is_layout_noise())
        .map(LineRecord::render)
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Snapshot {
        content,
        viewport: document.viewport(),
    })
}

fn walk(
    document: &Document,
    session: &mut PageSession,
    element: &Element,
    depth: usize,
    filter: SnapshotFilter,
    lines: &mut Vec<LineRecord>,
) -> Result<(), SnapshotError> {
    if depth > MAX_TRAVERSAL_DEPTH {
        return Ok(());
    }

    let included = should_include(document, element, filter)?;
    if included {
        let reference = session.registry.allocate_or_reuse(element);
        lines.push(LineRecord {
            depth,
            role: roles::derive_role(element),
            name: name::derive_name(document, element),
            reference,
            attrs: line_attrs(element),
            is_root: false,
        });
    }

    // Excluded wrappers do not consume the depth budget.
    let child_depth = if included { depth + 1 } else { depth };
    for child in element.children() {
        walk(document, session, &child, child_depth, filter, lines)?;
    }
    Ok(())
}

fn should_include(
    document: &Document,
    element: &Element,
    filter: SnapshotFilter,
) -> Result<bool, SnapshotError> {
    if judges::is_hard_excluded(element) {
        return Ok(false);
    }

    let style = document
        .computed_style(element)
        .map_err(|err| RefScopeError::traversal(err.to_string()))?;
    if !style.is_rendered() {
        return Ok(false);
    }
    let layout = element.layout();
    if layout.is_empty() {
        return Ok(false);
    }

    if filter != SnapshotFilter::All && !layout.intersects(&document.viewport_rect()) {
        return Ok(false);
    }

    Ok(match filter {
        SnapshotFilter::Interactive => judges::is_interactive(element),
        SnapshotFilter::Standard | SnapshotFilter::All => {
            judges::is_interactive(element)
                || judges::is_semantic(element)
                || !name::derive_name(document, element).is_empty()
                || judges::matches_functional_keywords(element)
                || judges::is_structural_container(element)
        }
    })
}

fn line_attrs(element: &Element) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    for key in ["id", "href", "type", "placeholder"] {
        if let Some(value) = element.attribute(key) {
            if !value.is_empty() {
                attrs.push((key, value));
            }
        }
    }
    attrs
}

#[cfg(test)]
mod tests {
    use page_model::ComputedStyle;
    use refscope_core_types::{Rect, Viewport};

    use super::*;

    fn doc() -> Document {
        Document::new(Viewport::new(1280.0, 720.0))
    }

    fn on_screen() -> Rect {
        Rect::new(10.0, 10.0, 100.0, 30.0)
    }

    #[test]
    fn root_is_always_present() {
        let doc = doc();
        let mut session = PageSession::new();
        let snapshot = generate_snapshot(&doc, &mut session, SnapshotFilter::Standard).unwrap();
        assert!(snapshot.content.starts_with("- document [ref=ref_1]"));
        assert_eq!(snapshot.viewport, Viewport::new(1280.0, 720.0));
    }

    #[test]
    fn interactive_node_gets_a_line_with_attrs() {
        let doc = doc();
        let button = Element::new("button")
            .with_attribute("id", "save")
            .with_text("Save")
            .with_layout(on_screen());
        doc.body().append_child(&button);

        let mut session = PageSession::new();
        let snapshot = generate_snapshot(&doc, &mut session, SnapshotFilter::Standard).unwrap();
        assert!(snapshot
            .content
            .contains("- button \"Save\" [ref=ref_2] id=\"save\""));
    }

    #[test]
    fn hidden_and_hard_excluded_nodes_are_absent() {
        let doc = doc();
        let script = Element::new("script").with_layout(on_screen());
        let hidden = Element::new("button")
            .with_text("Ghost")
            .with_layout(on_screen())
            .with_style(ComputedStyle::hidden());
        let zero_box = Element::new("button").with_text("Flat");
        doc.body().append_child(&script);
        doc.body().append_child(&hidden);
        doc.body().append_child(&zero_box);

        let mut session = PageSession::new();
        let snapshot = generate_snapshot(&doc, &mut session, SnapshotFilter::Standard).unwrap();
        assert!(!snapshot.content.contains("Ghost"));
        assert!(!snapshot.content.contains("Flat"));
        assert!(!snapshot.content.contains("script"));
    }

    #[test]
    fn excluded_wrappers_are_depth_transparent() {
        let doc = doc();
        // Nest a button below more plain wrappers than the depth budget
        // allows; every wrapper is excluded, so the button must still
        // appear.
        let mut current = doc.body();
        for _ in 0..30 {
            let wrapper = Element::new("div").with_layout(on_screen());
            current.append_child(&wrapper);
            current = wrapper;
        }
        let button = Element::new("button")
            .with_text("Deep")
            .with_layout(on_screen());
        current.append_child(&button);

        let mut session = PageSession::new();
        let snapshot = generate_snapshot(&doc, &mut session, SnapshotFilter::Standard).unwrap();
        assert!(snapshot.content.contains("\"Deep\""));
    }

    #[test]
    fn included_nodes_consume_depth() {
        let doc = doc();
        let mut current = doc.body();
        for i in 0..MAX_TRAVERSAL_DEPTH + 2 {
            let wrapper = Element::new("nav")
                .with_attribute("id", &format!("level-{i}"))
                .with_layout(on_screen());
            current.append_child(&wrapper);
            current = wrapper;
        }

        let mut session = PageSession::new();
        let snapshot = generate_snapshot(&doc, &mut session, SnapshotFilter::Standard).unwrap();
        assert!(snapshot.content.contains("id=\"level-13\""));
        assert!(!snapshot.content.contains("id=\"level-15\""));
    }

    #[test]
    fn bare_generic_lines_are_dropped_but_still_referenced() {
        let doc = doc();
        let noise = Element::new("div").with_layout(on_screen());
        noise.set_attribute("tabindex", "0"); // interactive but nameless generic
        doc.body().append_child(&noise);

        let mut session = PageSession::new();
        let snapshot = generate_snapshot(&doc, &mut session, SnapshotFilter::Standard).unwrap();
        // The line is filtered as layout noise, but the reference was
        // allocated during the pass and stays stable.
        assert!(!snapshot.content.contains("ref_2"));
        assert_eq!(session.registry.len(), 2);
    }

    #[test]
    fn viewport_gating_only_lifted_by_all() {
        let doc = doc();
        let offscreen = Element::new("button")
            .with_text("Below the fold")
            .with_layout(Rect::new(0.0, 5000.0, 100.0, 30.0));
        doc.body().append_child(&offscreen);

        let mut session = PageSession::new();
        for filter in [SnapshotFilter::Standard, SnapshotFilter::Interactive] {
            let snapshot = generate_snapshot(&doc, &mut session, filter).unwrap();
            assert!(!snapshot.content.contains("Below the fold"), "{filter:?}");
        }
        let all = generate_snapshot(&doc, &mut session, SnapshotFilter::All).unwrap();
        assert!(all.content.contains("Below the fold"));
    }

    #[test]
    fn interactive_filter_drops_headings() {
        let doc = doc();
        let heading = Element::new("h1").with_text("Welcome").with_layout(on_screen());
        let link = Element::new("a")
            .with_attribute("href", "/docs")
            .with_text("Docs")
            .with_layout(on_screen());
        doc.body().append_child(&heading);
        doc.body().append_child(&link);

        let mut session = PageSession::new();
        let standard = generate_snapshot(&doc, &mut session, SnapshotFilter::Standard).unwrap();
        assert!(standard.content.contains("heading"));
        let interactive =
            generate_snapshot(&doc, &mut session, SnapshotFilter::Interactive).unwrap();
        assert!(!interactive.content.contains("heading"));
        assert!(interactive
            .content
            .contains("- link \"Docs\" [ref=ref_3] href=\"/docs\""));
    }

    #[test]
    fn snapshot_runs_garbage_collection() {
        let doc = doc();
        let button = Element::new("button").with_text("Gone").with_layout(on_screen());
        doc.body().append_child(&button);

        let mut session = PageSession::new();
        generate_snapshot(&doc, &mut session, SnapshotFilter::Standard).unwrap();
        assert_eq!(session.registry.len(), 2);

        button.detach();
        drop(button);
        generate_snapshot(&doc, &mut session, SnapshotFilter::Standard).unwrap();
        assert_eq!(session.registry.len(), 1);
    }
}
