//! Snapshot engine: traverses the visible document, decides which
//! nodes are worth exposing, derives role and accessible name, and
//! serializes an indented textual tree whose every line carries a
//! stable `[ref=...]` allocated through the reference registry.

pub mod engine;
pub mod errors;
pub mod judges;
pub mod model;
pub mod name;
pub mod roles;

pub use engine::{generate_snapshot, MAX_TRAVERSAL_DEPTH};
pub use errors::SnapshotError;
pub use model::{Snapshot, SnapshotFilter};
