//! Page-scoped reference registry.
//!
//! Maps opaque `ref_N` ids to non-owning handles on live elements. The
//! registry never owns a node: entries hold weak handles plus an
//! attachment check against the document root, and stale entries are
//! purged opportunistically (after each snapshot pass) and on failed
//! resolution.

pub mod registry;
pub mod session;

pub use registry::ReferenceRegistry;
pub use session::PageSession;
