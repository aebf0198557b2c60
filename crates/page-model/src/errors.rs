use thiserror::Error;

/// Faults raised at the page boundary. Style and geometry reads fail
/// for nodes the host page has already removed; the snapshot engine
/// wraps these as traversal faults instead of emitting a partial tree.
#[derive(Debug, Error, Clone)]
pub enum PageError {
    #[error("node <{tag}> is no longer attached to the document")]
    NodeGone { tag: String },
}
