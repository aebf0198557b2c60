use page_model::Element;

/// Derives the exposed role for an element: an explicit `role`
/// attribute wins, then a fixed tag table, then `"generic"`.
pub fn derive_role(element: &Element) -> String {
    if let Some(role) = element.attribute("role") {
        if !role.trim().is_empty() {
            return role.trim().to_string();
        }
    }
    tag_role(element).to_string()
}

fn tag_role(element: &Element) -> &'static str {
    match element.tag().as_str() {
        "html" => "document",
        "a" => "link",
        "button" => "button",
        "input" => input_role(element),
        "select" => "combobox",
        "textarea" => "textbox",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "img" => "image",
        "nav" => "navigation",
        "main" => "main",
        "header" => "banner",
        "footer" => "contentinfo",
        "section" => "region",
        "article" => "article",
        "aside" => "complementary",
        "form" => "form",
        "table" => "table",
        "ul" | "ol" => "list",
        "li" => "listitem",
        "label" => "label",
        _ => "generic",
    }
}

fn input_role(element: &Element) -> &'static str {
    match element.attribute("type").as_deref() {
        Some("button") | Some("submit") | Some("reset") => "button",
        Some("checkbox") => "checkbox",
        Some("radio") => "radio",
        _ => "textbox",
    }
}
