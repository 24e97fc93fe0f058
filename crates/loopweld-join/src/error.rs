//! Error types for segment joining.

use loopweld_geom::PolygonError;
use loopweld_math::Point3;
use thiserror::Error;

/// Errors that can occur while joining segments into a chain or loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JoinError {
    /// Nothing to join.
    #[error("no segments to join")]
    Empty,

    /// A segment endpoint has a NaN or infinite coordinate.
    #[error("segment {0} has a non-finite endpoint")]
    NonFiniteEndpoint(usize),

    /// More than two segments meet at one point.
    #[error("{count} segments meet at {point}; cannot form a single chain")]
    AmbiguousTopology {
        /// Location of the branching node (grid point of its key).
        point: Point3,
        /// Number of incident segments.
        count: usize,
    },

    /// More free ends than a single open chain can have.
    #[error("{0} free ends found; a single chain has at most 2")]
    TooManyTermini(usize),

    /// Exactly one free end, which no set of joined segments can produce.
    #[error("exactly one free end found")]
    InconsistentTermini,

    /// The walk could not continue although classification passed.
    ///
    /// Signals malformed node data (or input made of several disconnected
    /// pieces) rather than a recoverable user error.
    #[error("chain broke after {joined} of {total} segments: {reason}")]
    BrokenChain {
        /// Segments placed before the break.
        joined: usize,
        /// Segments in the input.
        total: usize,
        /// What went wrong.
        reason: &'static str,
    },

    /// A polygon was requested from an open chain.
    #[error("chain is open; only closed chains form loops")]
    NotClosed,

    /// The closed chain's vertices do not form a valid polygon.
    #[error("degenerate loop: {0}")]
    DegenerateLoop(#[from] PolygonError),
}

/// Result type for join operations.
pub type Result<T> = std::result::Result<T, JoinError>;
