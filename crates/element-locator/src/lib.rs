//! Element locator: turns a `ref_N` back into a live element, scrolls
//! it into view, and reports where and what it is. Failures are
//! structured envelopes; this crate never panics on a stale reference.

pub mod locator;
pub mod types;

pub use locator::{locate, resolve_target};
pub use types::{ElementAttributes, LocateOutcome, LocatedElement};
