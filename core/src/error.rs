//! Error type shared by every graph operation.

use thiserror::Error;

use crate::adjacency::VertexId;

/// Errors reported by graph mutation, traversal, persistence and matrix
/// ingestion.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A graph was requested with a declared capacity of zero.
    #[error("invalid graph capacity: {0}")]
    InvalidCapacity(usize),

    /// An argument was outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An edge operation was attempted on a graph with no vertices.
    #[error("graph has no vertices")]
    EmptyGraph,

    /// A vertex with this id is already present.
    #[error("vertex already exists: {0}")]
    DuplicateVertex(VertexId),

    /// No vertex with this id exists.
    #[error("vertex not found: {0}")]
    VertexNotFound(VertexId),

    /// The origin vertex has no edge to the target.
    #[error("edge not found: {origin} -> {target}")]
    EdgeNotFound { origin: VertexId, target: VertexId },

    /// A traversal was started with a visited set left over from a previous run.
    #[error("visited set is not clean; reset it before starting a new traversal")]
    StaleVisitedSet,

    /// The dense best-path matrix would exceed the supported size.
    #[error("vertex bound {bound} exceeds the supported maximum of {max}")]
    BoundTooLarge { bound: usize, max: usize },

    /// A vertex id does not fit inside the requested dense bound.
    #[error("vertex {id} is outside the bound 0..{bound}")]
    VertexOutOfRange { id: VertexId, bound: usize },

    /// No best path reaches this vertex from the source.
    #[error("vertex {0} is unreachable from the source")]
    Unreachable(VertexId),

    /// The predecessor table loops without returning to the source.
    #[error("predecessor chain from vertex {0} never reaches the source")]
    BrokenPredecessorChain(VertexId),

    /// Reading or writing a file or stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted graph data is malformed.
    #[error("corrupt graph data: {0}")]
    Corrupt(String),

    /// A weight matrix contained a token that is not an integer.
    #[error("line {line}: invalid weight '{token}'")]
    Parse { line: usize, token: String },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::VertexNotFound(42);
        assert!(err.to_string().contains("42"));

        let err = GraphError::EdgeNotFound { origin: 1, target: 7 };
        assert_eq!(err.to_string(), "edge not found: 1 -> 7");

        let err = GraphError::BoundTooLarge { bound: 150, max: 100 };
        assert!(err.to_string().contains("150"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GraphError = io.into();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
