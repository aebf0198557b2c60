use page_model::Element;
use refscope_core_types::ActionFailure;
use serde::Serialize;
use serde_json::Value;

/// Closed set of control kinds `set_value` dispatches over, checked in
/// priority order. Everything that is not a value-bearing control lands
/// in `Unsupported` and fails with an actionable message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Select,
    Checkbox,
    Radio,
    /// date, time, datetime-local, month or week input; the concrete
    /// type string is carried for reporting.
    DateLike(String),
    Range,
    Number,
    Text,
    TextArea,
    Unsupported(String),
}

pub fn classify(element: &Element) -> ControlKind {
    match element.tag().as_str() {
        "select" => ControlKind::Select,
        "textarea" => ControlKind::TextArea,
        "input" => {
            let kind = element
                .attribute("type")
                .unwrap_or_default()
                .to_ascii_lowercase();
            match kind.as_str() {
                "checkbox" => ControlKind::Checkbox,
                "radio" => ControlKind::Radio,
                "date" | "time" | "datetime-local" | "month" | "week" => {
                    ControlKind::DateLike(kind)
                }
                "range" => ControlKind::Range,
                "number" => ControlKind::Number,
                // Unrecognized input types take the generic text path,
                // as a browser's value assignment would.
                _ => ControlKind::Text,
            }
        }
        other => ControlKind::Unsupported(other.to_string()),
    }
}

/// Success payload: what kind of control was mutated and the value
/// transition, with previous/new kept dynamically typed because
/// checkboxes report booleans while everything else reports strings.
#[derive(Clone, Debug, Serialize)]
pub struct SetValueReport {
    pub success: bool,
    pub element_type: String,
    pub previous_value: Value,
    pub new_value: Value,
    pub message: String,
}

impl SetValueReport {
    pub fn new(
        element_type: impl Into<String>,
        previous_value: Value,
        new_value: Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            element_type: element_type.into(),
            previous_value,
            new_value,
            message: message.into(),
        }
    }
}

/// Uniform outbound envelope for `set_value`.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum SetValueOutcome {
    Done(SetValueReport),
    Failed(ActionFailure),
}

impl SetValueOutcome {
    pub fn success(&self) -> bool {
        matches!(self, SetValueOutcome::Done(_))
    }

    pub fn report(&self) -> Option<&SetValueReport> {
        match self {
            SetValueOutcome::Done(report) => Some(report),
            SetValueOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ActionFailure> {
        match self {
            SetValueOutcome::Done(_) => None,
            SetValueOutcome::Failed(failure) => Some(failure),
        }
    }
}
