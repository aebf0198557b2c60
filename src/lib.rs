//! refscope library facade.
//!
//! Re-exports the element-reference subsystem crates and hosts the
//! demo page used by the CLI and the integration tests.

pub mod demo;

pub use element_locator::{locate, LocateOutcome, LocatedElement};
pub use page_model::{ComputedStyle, Document, Element, ScrollBehavior};
pub use refscope_core_types::{
    ActionFailure, ElementRef, PageId, Point, Rect, RefScopeError, Viewport,
};
pub use refscope_registry::{PageSession, ReferenceRegistry};
pub use snapshot_engine::{generate_snapshot, Snapshot, SnapshotError, SnapshotFilter};
pub use value_setter::{set_value, SetValueOutcome, SetValueReport};
