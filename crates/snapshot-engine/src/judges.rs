//! Per-node inclusion predicates. These decide which of thousands of
//! DOM nodes are worth a line in the snapshot.

use page_model::Element;

const HARD_EXCLUDED_TAGS: &[&str] = &["script", "style", "meta", "link", "title", "noscript"];

const NATIVE_INTERACTIVE_TAGS: &[&str] = &[
    "a", "button", "input", "select", "textarea", "option", "summary", "details",
];

const INTERACTIVE_ROLES: &[&str] = &[
    "button",
    "link",
    "checkbox",
    "radio",
    "textbox",
    "searchbox",
    "combobox",
    "listbox",
    "option",
    "menu",
    "menubar",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "tab",
    "switch",
    "slider",
    "spinbutton",
];

const LANDMARK_TAGS: &[&str] = &[
    "nav", "main", "header", "footer", "aside", "section", "article", "form",
];

/// Keywords that rescue an otherwise generic container: its id/class
/// suggests it fronts something functional.
const FUNCTIONAL_KEYWORDS: &[&str] = &[
    "btn", "button", "link", "menu", "nav", "search", "dropdown", "toggle", "modal", "dialog",
    "submit",
];

const CONTAINER_TAGS: &[&str] = &["form", "nav", "fieldset"];
const CONTAINER_KEYWORDS: &[&str] = &["search", "menu", "nav", "form"];

/// Non-rendering tags and aria-hidden subtree roots never get a line.
/// Traversal still descends through them.
pub fn is_hard_excluded(element: &Element) -> bool {
    HARD_EXCLUDED_TAGS.contains(&element.tag().as_str())
        || element.attribute("aria-hidden").as_deref() == Some("true")
}

/// Interactive: native interactive tag, explicit interactive role, or
/// evidence of wired-up behavior (click listener, tabindex,
/// contenteditable).
pub fn is_interactive(element: &Element) -> bool {
    if NATIVE_INTERACTIVE_TAGS.contains(&element.tag().as_str()) {
        return true;
    }
    if let Some(role) = element.attribute("role") {
        if INTERACTIVE_ROLES.contains(&role.trim()) {
            return true;
        }
    }
    if element.has_listener("click") || element.has_attribute("tabindex") {
        return true;
    }
    element
        .attribute("contenteditable")
        .is_some_and(|v| v != "false")
}

/// Semantic: heading, landmark tag, or any explicit role.
pub fn is_semantic(element: &Element) -> bool {
    let tag = element.tag();
    if matches!(tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6") {
        return true;
    }
    if LANDMARK_TAGS.contains(&tag.as_str()) {
        return true;
    }
    element
        .attribute("role")
        .is_some_and(|role| !role.trim().is_empty())
}

pub fn matches_functional_keywords(element: &Element) -> bool {
    id_class_contains(element, FUNCTIONAL_KEYWORDS)
}

/// Structural container likely to hold interactive descendants.
pub fn is_structural_container(element: &Element) -> bool {
    CONTAINER_TAGS.contains(&element.tag().as_str())
        || id_class_contains(element, CONTAINER_KEYWORDS)
}

fn id_class_contains(element: &Element, keywords: &[&str]) -> bool {
    let mut haystack = element.attribute("id").unwrap_or_default();
    if let Some(class) = element.attribute("class") {
        haystack.push(' ');
        haystack.push_str(&class);
    }
    let haystack = haystack.to_ascii_lowercase();
    keywords.iter().any(|kw| haystack.contains(kw))
}
