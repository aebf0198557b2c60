use refscope_core_types::RefScopeError;
use thiserror::Error;

/// Errors a snapshot pass can surface. Traversal faults carry the
/// shared traversal class from `refscope-core-types`; filter parsing
/// fails before any tree walk starts.
#[derive(Debug, Error, Clone)]
pub enum SnapshotError {
    #[error("Unknown snapshot filter \"{name}\"; expected \"all\", \"interactive\" or nothing")]
    UnknownFilter { name: String },
    #[error(transparent)]
    Traversal(#[from] RefScopeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_filter_names_the_input() {
        let err = SnapshotError::UnknownFilter {
            name: "everything".into(),
        };
        assert!(err.to_string().contains("\"everything\""));
    }

    #[test]
    fn traversal_preserves_the_shared_message() {
        let err = SnapshotError::from(RefScopeError::traversal("node <div> is gone"));
        assert!(err.to_string().contains("traversal failed"));
        assert!(err.to_string().contains("<div>"));
    }
}
