//! Accessible-name derivation. First match wins, in the same priority
//! order the serialized tree is documented against: selected option
//! text, aria-label, placeholder, title, alt, associated label, input
//! values, direct clickable text, heading text, image filename, and
//! finally direct text content of at least three characters.

use page_model::{Document, Element};

const HEADING_TEXT_CAP: usize = 100;
const SHORT_VALUE_CAP: usize = 50;
const DIRECT_TEXT_CAP: usize = 50;
const DIRECT_TEXT_MIN: usize = 3;

pub fn derive_name(document: &Document, element: &Element) -> String {
    let tag = element.tag();

    if tag == "select" {
        if let Some(option) = element.selected_option() {
            let text = collapse(&option.text_content());
            if !text.is_empty() {
                return text;
            }
        }
    }

    for attr in ["aria-label", "placeholder", "title", "alt"] {
        if let Some(value) = element.attribute(attr) {
            let value = collapse(&value);
            if !value.is_empty() {
                return value;
            }
        }
    }

    if let Some(id) = element.id() {
        if let Some(label) = document.label_for(&id) {
            let text = collapse(&label.text_content());
            if !text.is_empty() {
                return text;
            }
        }
    }

    if tag == "input" {
        if let Some(name) = input_value_name(element) {
            return name;
        }
    }

    // Clickable text elements expose only their direct text children;
    // descendant elements are included on their own lines.
    if matches!(tag.as_str(), "button" | "a" | "summary") {
        let text = collapse(&element.direct_text());
        if !text.is_empty() {
            return text;
        }
    }

    if matches!(tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6") {
        let text = collapse(&element.text_content());
        if !text.is_empty() {
            return cap(&text, HEADING_TEXT_CAP);
        }
    }

    if tag == "img" {
        if let Some(src) = element.attribute("src") {
            let filename = src.rsplit('/').next().unwrap_or(&src);
            if !filename.is_empty() {
                return format!("Image: {filename}");
            }
        }
    }

    let text = collapse(&element.direct_text());
    if text.chars().count() >= DIRECT_TEXT_MIN {
        return truncate_with_ellipsis(&text, DIRECT_TEXT_CAP);
    }

    String::new()
}

fn input_value_name(element: &Element) -> Option<String> {
    let kind = element.attribute("type").unwrap_or_default();
    if matches!(kind.as_str(), "submit" | "button" | "reset") {
        let label = element
            .attribute("value")
            .map(|v| collapse(&v))
            .filter(|v| !v.is_empty())
            .or_else(|| Some(collapse(&element.value())).filter(|v| !v.is_empty()));
        return label;
    }
    let value = collapse(&element.value());
    if !value.is_empty() && value.chars().count() <= SHORT_VALUE_CAP {
        return Some(value);
    }
    None
}

/// Collapses all interior whitespace runs to single spaces and trims.
pub fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn cap(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut out: String = text.chars().take(max).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}
