//! Host page boundary for the refscope subsystem.
//!
//! This crate models the environment the subsystem does not own: a
//! mutable DOM tree of externally owned elements, plus the document
//! services layered on top of it (viewport, scroll, focus, layout
//! flushes, bubbling event dispatch). Higher layers hold only cheap
//! clonable [`Element`] handles or non-owning [`WeakElement`] handles;
//! nothing here is ever copied into the snapshot/registry layers.

pub mod document;
pub mod errors;
pub mod events;
pub mod node;
pub mod style;

pub use document::{Document, ScrollBehavior};
pub use errors::PageError;
pub use events::{Event, Listener};
pub use node::{Element, NodeChild, WeakElement};
pub use style::ComputedStyle;
