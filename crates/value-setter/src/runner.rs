use element_locator::resolve_target;
use page_model::{Document, Element, ScrollBehavior};
use refscope_core_types::{ActionFailure, ElementRef, RefScopeError};
use refscope_registry::PageSession;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::model::{classify, ControlKind, SetValueOutcome, SetValueReport};

const ACTION: &str = "set_value";

/// Resolves the reference and mutates the control according to its
/// kind. Every success path focuses the element, assigns the value,
/// then dispatches a bubbling `change` followed by a bubbling `input`
/// event, because direct assignment alone does not notify the
/// listeners a reactive page depends on.
#[instrument(skip(document, session, value), fields(reference = %reference))]
pub fn set_value(
    document: &Document,
    session: &mut PageSession,
    reference: &ElementRef,
    value: &Value,
) -> SetValueOutcome {
    let element = match resolve_target(document, session, reference, ACTION) {
        Ok(element) => element,
        Err(failure) => return SetValueOutcome::Failed(failure),
    };

    // Smooth is fine here: unlike locate, nothing measures geometry
    // right after the scroll.
    document.scroll_element_into_view(&element, ScrollBehavior::Smooth);

    let outcome = match classify(&element) {
        ControlKind::Select => set_select(document, &element, value),
        ControlKind::Checkbox => set_checkbox(document, &element, value),
        ControlKind::Radio => set_radio(document, &element),
        ControlKind::DateLike(kind) => set_date_like(document, &element, value, &kind),
        ControlKind::Range => set_range(document, &element, value),
        ControlKind::Number => set_number(document, &element, value),
        ControlKind::Text => set_text(document, &element, value, "text"),
        ControlKind::TextArea => set_text(document, &element, value, "textarea"),
        ControlKind::Unsupported(kind) => {
            SetValueOutcome::Failed(ActionFailure::new(
                ACTION,
                RefScopeError::unsupported(kind).to_string(),
            ))
        }
    };
    debug!(success = outcome.success(), "set_value finished");
    outcome
}

/// Focus, assign, then notify. All registry mutation happened during
/// resolution, before any listener can re-enter the subsystem.
fn commit(document: &Document, element: &Element, assign: impl FnOnce(&Element)) {
    document.set_focus(element);
    assign(element);
    document.dispatch_bubbling(element, "change");
    document.dispatch_bubbling(element, "input");
}

fn set_select(document: &Document, element: &Element, value: &Value) -> SetValueOutcome {
    let Some(wanted) = coerce_scalar(value) else {
        return invalid(format!(
            "Select options are matched by string; got {}",
            render_json(value)
        ));
    };

    let options = element.options();
    let matched = options.iter().position(|option| {
        option.attribute("value").as_deref() == Some(wanted.as_str())
            || option.text_content().trim() == wanted
    });
    let Some(index) = matched else {
        let available = options
            .iter()
            .map(|option| {
                format!(
                    "value=\"{}\" text=\"{}\"",
                    option.attribute("value").unwrap_or_default(),
                    option.text_content().trim()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        return SetValueOutcome::Failed(ActionFailure::new(
            ACTION,
            format!("No option matching \"{wanted}\" was found; available options: {available}"),
        ));
    };

    let previous = element
        .selected_option()
        .map(|option| {
            option
                .attribute("value")
                .unwrap_or_else(|| option.text_content().trim().to_string())
        })
        .map_or(Value::Null, Value::String);
    let option = &options[index];
    let new_value = option
        .attribute("value")
        .unwrap_or_else(|| option.text_content().trim().to_string());

    commit(document, element, |el| {
        el.set_selected_index(Some(index));
        el.set_value(&new_value);
    });
    SetValueOutcome::Done(SetValueReport::new(
        "select",
        previous,
        Value::String(new_value),
        format!("Selected option \"{wanted}\""),
    ))
}

fn set_checkbox(document: &Document, element: &Element, value: &Value) -> SetValueOutcome {
    let Value::Bool(state) = value else {
        return invalid(format!(
            "Checkbox values must be true or false; got {}",
            render_json(value)
        ));
    };
    let previous = element.checked();
    commit(document, element, |el| el.set_checked(*state));
    SetValueOutcome::Done(SetValueReport::new(
        "checkbox",
        json!(previous),
        json!(*state),
        if *state {
            "Checkbox is now checked"
        } else {
            "Checkbox is now unchecked"
        },
    ))
}

/// Radios are always checked by this action; unchecking happens only by
/// checking another radio in the group.
fn set_radio(document: &Document, element: &Element) -> SetValueOutcome {
    let previous = element.checked();
    commit(document, element, |el| document.check_radio(el));
    SetValueOutcome::Done(SetValueReport::new(
        "radio",
        json!(previous),
        json!(true),
        "Radio button is now selected",
    ))
}

fn set_date_like(
    document: &Document,
    element: &Element,
    value: &Value,
    kind: &str,
) -> SetValueOutcome {
    let Some(text) = coerce_scalar(value) else {
        return invalid(format!(
            "{kind} inputs take a string value; got {}",
            render_json(value)
        ));
    };
    let previous = element.value();
    commit(document, element, |el| el.set_value(&text));
    SetValueOutcome::Done(SetValueReport::new(
        kind,
        Value::String(previous),
        Value::String(text.clone()),
        format!("Set {kind} input to \"{text}\""),
    ))
}

fn set_range(document: &Document, element: &Element, value: &Value) -> SetValueOutcome {
    let Some(number) = numeric(value) else {
        return invalid(format!(
            "Range inputs require a numeric value; got {}",
            render_json(value)
        ));
    };
    let previous = element.value();
    let text = format_number(number);
    commit(document, element, |el| el.set_value(&text));
    SetValueOutcome::Done(SetValueReport::new(
        "range",
        Value::String(previous),
        Value::String(text.clone()),
        format!("Set range input to {text}"),
    ))
}

fn set_number(document: &Document, element: &Element, value: &Value) -> SetValueOutcome {
    let text = if matches!(value, Value::String(s) if s.is_empty()) {
        String::new()
    } else if let Some(number) = numeric(value) {
        format_number(number)
    } else {
        return invalid(format!(
            "Number inputs require a numeric value or an empty string; got {}",
            render_json(value)
        ));
    };
    let previous = element.value();
    commit(document, element, |el| el.set_value(&text));
    SetValueOutcome::Done(SetValueReport::new(
        "number",
        Value::String(previous),
        Value::String(text.clone()),
        format!("Set number input to \"{text}\""),
    ))
}

fn set_text(
    document: &Document,
    element: &Element,
    value: &Value,
    element_type: &str,
) -> SetValueOutcome {
    let Some(text) = coerce_scalar(value) else {
        return invalid(format!(
            "Text fields take a string, number or boolean value; got {}",
            render_json(value)
        ));
    };
    let previous = element.value();
    commit(document, element, |el| {
        el.set_value(&text);
        // Caret to the end, where a user's next keystroke would land.
        el.set_caret(text.chars().count());
    });
    SetValueOutcome::Done(SetValueReport::new(
        element_type,
        Value::String(previous),
        Value::String(text.clone()),
        format!("Set {element_type} value to \"{text}\""),
    ))
}

fn invalid(message: String) -> SetValueOutcome {
    SetValueOutcome::Failed(ActionFailure::new(
        ACTION,
        RefScopeError::invalid_value(message).to_string(),
    ))
}

fn coerce_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Stringifies a number the way a control's value attribute holds it:
/// integral values without a trailing `.0`.
fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

fn render_json(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}
