//! Shared primitives for the refscope element-reference subsystem.
//!
//! Everything that crosses a crate boundary lives here: the opaque
//! element reference id, geometry types, the uniform failure envelope
//! returned to the automation driver, and the shared error taxonomy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error taxonomy shared by every operation in the subsystem.
///
/// `StaleReference`, `UnsupportedControl` and `InvalidValue` are always
/// recovered locally and surfaced as structured failure envelopes;
/// `Traversal` is the only class that propagates as an `Err` (from
/// snapshot generation, where a partial tree is worse than a fault).
#[derive(Debug, Error, Clone)]
pub enum RefScopeError {
    #[error("Element with reference {reference} was not found; it may have been removed from the page")]
    StaleReference { reference: String },
    #[error("Cannot set value on element of type {kind}; supported controls are select, checkbox, radio, date/time inputs, range, number, text inputs and textarea")]
    UnsupportedControl { kind: String },
    #[error("{message}")]
    InvalidValue { message: String },
    #[error("Snapshot traversal failed: {message}")]
    Traversal { message: String },
}

impl RefScopeError {
    pub fn stale(reference: impl Into<String>) -> Self {
        Self::StaleReference {
            reference: reference.into(),
        }
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedControl { kind: kind.into() }
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }

    pub fn traversal(message: impl Into<String>) -> Self {
        Self::Traversal {
            message: message.into(),
        }
    }
}

/// Identifier for one page lifetime. A navigation produces a fresh
/// registry but the id survives so logs can be correlated.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PageId(pub String);

impl PageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference id of the form `ref_<positive integer>`, unique and
/// monotonically increasing within one page session.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(String);

impl ElementRef {
    pub const PREFIX: &'static str = "ref_";

    pub fn from_index(index: u64) -> Self {
        Self(format!("{}{index}", Self::PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric part of the id, when well formed.
    pub fn index(&self) -> Option<u64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }
}

impl FromStr for ElementRef {
    type Err = RefScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s
            .strip_prefix(Self::PREFIX)
            .and_then(|rest| rest.parse::<u64>().ok())
            .is_some_and(|n| n > 0);
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(RefScopeError::invalid_value(format!(
                "Invalid element reference \"{s}\"; expected the form ref_<positive integer>"
            )))
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visible-area dimensions at snapshot time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle. Layout boxes are stored in document
/// coordinates; client rects are derived by subtracting the scroll
/// offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Failure half of the uniform outbound envelope: `success` is always
/// false, `message` is a complete actionable sentence, `action` names
/// the operation that failed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionFailure {
    pub success: bool,
    pub message: String,
    pub action: String,
}

impl ActionFailure {
    pub fn new(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            action: action.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ref_round_trip() {
        let r = ElementRef::from_index(7);
        assert_eq!(r.as_str(), "ref_7");
        assert_eq!(r.index(), Some(7));
        assert_eq!("ref_7".parse::<ElementRef>().unwrap(), r);
    }

    #[test]
    fn element_ref_rejects_malformed() {
        assert!("ref_".parse::<ElementRef>().is_err());
        assert!("ref_0".parse::<ElementRef>().is_err());
        assert!("node_3".parse::<ElementRef>().is_err());
        assert!("ref_abc".parse::<ElementRef>().is_err());
    }

    #[test]
    fn rect_intersection() {
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(Rect::new(90.0, 90.0, 20.0, 20.0).intersects(&viewport));
        assert!(!Rect::new(100.0, 0.0, 10.0, 10.0).intersects(&viewport));
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
    }

    #[test]
    fn failure_envelope_shape() {
        let failure = ActionFailure::new("locate", "Element with reference ref_3 was not found");
        assert!(!failure.success);
        assert_eq!(failure.action, "locate");
    }
}
