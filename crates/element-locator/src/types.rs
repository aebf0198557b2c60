use refscope_core_types::{ActionFailure, ElementRef, Point, Rect};
use serde::Serialize;

/// Small attribute snapshot taken alongside geometry so a driver can
/// sanity-check it resolved the element it meant.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ElementAttributes {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub control_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "aria-label", skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Success payload of `locate`: viewport-relative geometry measured
/// after an instant centered scroll and a forced layout flush.
#[derive(Clone, Debug, Serialize)]
pub struct LocatedElement {
    pub success: bool,
    pub reference: ElementRef,
    /// Center point, safe to hand to a click that follows.
    pub point: Point,
    /// Compact `tag#id.class` descriptor.
    pub descriptor: String,
    pub attributes: ElementAttributes,
    pub rect: Rect,
    pub is_visible: bool,
    pub is_interactable: bool,
}

/// Uniform outbound envelope: serializes as `{success: true, ...}` or
/// `{success: false, message, action}`.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum LocateOutcome {
    Found(LocatedElement),
    NotFound(ActionFailure),
}

impl LocateOutcome {
    pub fn success(&self) -> bool {
        matches!(self, LocateOutcome::Found(_))
    }

    pub fn found(&self) -> Option<&LocatedElement> {
        match self {
            LocateOutcome::Found(el) => Some(el),
            LocateOutcome::NotFound(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ActionFailure> {
        match self {
            LocateOutcome::Found(_) => None,
            LocateOutcome::NotFound(failure) => Some(failure),
        }
    }
}
