//! Filter behavior across whole snapshot passes.

use refscope_cli::demo::build_demo_page;
use refscope_cli::{generate_snapshot, PageSession, SnapshotFilter};

/// Lines minus the always-present root, with indentation stripped:
/// depth depends on which ancestors a filter includes, so only the
/// trimmed line text is comparable across filters.
fn non_root_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .skip(1)
        .map(|line| line.trim_start().to_string())
        .collect()
}

/// A line carries an accessible name only when a quote appears before
/// the `[ref=` marker; quotes after it belong to attribute values.
fn has_quoted_name(line: &str) -> bool {
    line.split(" [ref=")
        .next()
        .is_some_and(|head| head.contains('"'))
}

#[test]
fn interactive_lines_are_a_subset_of_named_default_lines() {
    let page = build_demo_page();
    let mut session = PageSession::new();

    let standard =
        generate_snapshot(&page.document, &mut session, SnapshotFilter::Standard).unwrap();
    let interactive =
        generate_snapshot(&page.document, &mut session, SnapshotFilter::Interactive).unwrap();

    // Identity stability makes the line text comparable across passes.
    let named_standard: Vec<String> = non_root_lines(&standard.content)
        .into_iter()
        .filter(|line| has_quoted_name(line))
        .collect();
    // The form is nameless; its attribute quoting must not count as a
    // name.
    assert!(!named_standard
        .iter()
        .any(|line| line.contains("id=\"settings-form\"")));
    for line in non_root_lines(&interactive.content) {
        assert!(
            named_standard.contains(&line),
            "interactive line missing from default snapshot: {line}"
        );
    }
}

#[test]
fn offscreen_elements_appear_only_under_all() {
    let page = build_demo_page();
    let mut session = PageSession::new();

    let standard =
        generate_snapshot(&page.document, &mut session, SnapshotFilter::Standard).unwrap();
    let interactive =
        generate_snapshot(&page.document, &mut session, SnapshotFilter::Interactive).unwrap();
    let all = generate_snapshot(&page.document, &mut session, SnapshotFilter::All).unwrap();

    assert!(!standard.content.contains("Archive"));
    assert!(!interactive.content.contains("Archive"));
    assert!(all.content.contains("Archive"));
}

#[test]
fn snapshot_reports_viewport_dimensions() {
    let page = build_demo_page();
    let mut session = PageSession::new();
    let snapshot =
        generate_snapshot(&page.document, &mut session, SnapshotFilter::Standard).unwrap();
    assert_eq!(snapshot.viewport.width, 1280.0);
    assert_eq!(snapshot.viewport.height, 720.0);
}

#[test]
fn indentation_tracks_inclusion_depth() {
    let page = build_demo_page();
    let mut session = PageSession::new();
    let snapshot =
        generate_snapshot(&page.document, &mut session, SnapshotFilter::Standard).unwrap();

    // The form is included; its controls sit one level deeper.
    let form_line = snapshot
        .content
        .lines()
        .find(|l| l.contains("id=\"settings-form\""))
        .expect("form line");
    let select_line = snapshot
        .content
        .lines()
        .find(|l| l.contains("id=\"color\""))
        .expect("select line");
    let indent = |line: &str| line.chars().take_while(|c| *c == ' ').count();
    assert_eq!(indent(select_line), indent(form_line) + 2);
}
