//! Crate-wide error taxonomy.
//!
//! Every fallible operation in the engine returns [`EngineError`]. The
//! variants mirror the error kinds of the original design: structural
//! violations at a boundary, lookup failures, and search-control signals
//! that callers are expected to handle rather than propagate.

use thiserror::Error;

/// Errors produced while constructing or operating on automata, patterns,
/// and the modification search.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A shape or range violation at a construction boundary, e.g. an
    /// out-of-range initial state or a transition target outside `Q`.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A named symbol does not exist in the automaton's alphabet.
    #[error("symbol '{0}' is not in the alphabet")]
    InvalidSymbol(String),

    /// A rewrite was requested between a before/after pattern pair whose
    /// state counts or alphabet sizes differ; only same-shape rewrites are
    /// supported.
    #[error("rewrite between patterns of different shape is not supported")]
    NotYetImpl,

    /// No embedding exists for the requested pattern at or beyond the
    /// requested skip count. This is a normal search-control signal within
    /// [`crate::search::search`], not a fatal error.
    #[error("no embedding found for the requested pattern")]
    PatternNotFound,

    /// A property check exhausted its deadline before the BFS converged.
    /// Interpreted conservatively as "holds" by callers.
    #[error("property check timed out before converging")]
    Timeout,

    /// Malformed LTSA source text, with a 1-indexed line number.
    #[error("malformed LTSA source at line {line}: {message}")]
    Ltsa { line: usize, message: String },

    /// Propagated I/O failure while reading an LTSA file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidArg(a), Self::InvalidArg(b)) => a == b,
            (Self::InvalidSymbol(a), Self::InvalidSymbol(b)) => a == b,
            (Self::NotYetImpl, Self::NotYetImpl) => true,
            (Self::PatternNotFound, Self::PatternNotFound) => true,
            (Self::Timeout, Self::Timeout) => true,
            (Self::Ltsa { line: l1, message: m1 }, Self::Ltsa { line: l2, message: m2 }) => {
                l1 == l2 && m1 == m2
            }
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
