//! Error types for B-rep conversion.

use std::fmt;

use loopweld_geom::PolygonError;
use loopweld_join::JoinError;
use thiserror::Error;

/// Position of a loop inside a B-rep: face index and loop index within the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopRef {
    /// Face index.
    pub face: usize,
    /// Loop index within the face.
    pub loop_index: usize,
}

impl fmt::Display for LoopRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "face {}, loop {}", self.face, self.loop_index)
    }
}

/// Invalid conversion settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A setting is out of range.
    #[error("invalid settings: {0}")]
    Invalid(String),

    /// The TOML document could not be parsed.
    #[error("failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors that can occur while converting a B-rep into a solid.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The settings were rejected before conversion started.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A face index is out of range.
    #[error("face {0} does not exist")]
    MissingFace(usize),

    /// A loop index is out of range.
    #[error("{0} does not exist")]
    MissingLoop(LoopRef),

    /// A trim refers to an edge that does not exist.
    #[error("{at}: trim refers to missing edge {edge}")]
    MissingEdge {
        /// Loop holding the trim.
        at: LoopRef,
        /// The missing edge index.
        edge: usize,
    },

    /// An edge refers to a 3D curve that does not exist.
    #[error("{at}: edge {edge} refers to missing curve {curve}")]
    MissingCurve {
        /// Loop holding the trim.
        at: LoopRef,
        /// Edge holding the reference.
        edge: usize,
        /// The missing curve index.
        curve: usize,
    },

    /// A face has no outer loop.
    #[error("face {0} has no outer loop")]
    MissingOuterLoop(usize),

    /// A face has more than one outer loop.
    #[error("face {face} has {count} outer loops")]
    MultipleOuterLoops {
        /// Face index.
        face: usize,
        /// Number of outer loops found.
        count: usize,
    },

    /// The loop's segments could not be joined into one closed chain.
    #[error("{at}: {source}")]
    Join {
        /// The failing loop.
        at: LoopRef,
        /// Why joining failed.
        source: JoinError,
    },

    /// The loop joined but does not form a valid polygon.
    #[error("{at}: degenerate loop: {source}")]
    DegenerateLoop {
        /// The failing loop.
        at: LoopRef,
        /// Why the polygon was rejected.
        source: PolygonError,
    },
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
