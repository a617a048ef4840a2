//! Domain error types.
//!
//! These errors represent misuse of the path and compaction types. They are
//! distinct from provider/IO errors, which live in `network`.

use super::Direction;

/// Domain-level errors raised while building or compacting a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A step was appended to a compact run heading another way.
    #[error("cannot append a step heading {step} to a run heading {run}")]
    InvalidCompactionState { run: Direction, step: Direction },

    /// A step was appended to a run that has already been finalized.
    #[error("compact step is already finalized")]
    RunFinalized,

    /// A raw step was added after the path was compacted.
    #[error("path has already been compacted")]
    PathAlreadyCompacted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidCompactionState {
            run: Direction::East,
            step: Direction::North,
        };
        assert_eq!(
            err.to_string(),
            "cannot append a step heading north to a run heading east"
        );

        let err = DomainError::RunFinalized;
        assert_eq!(err.to_string(), "compact step is already finalized");

        let err = DomainError::PathAlreadyCompacted;
        assert_eq!(err.to_string(), "path has already been compacted");
    }
}
