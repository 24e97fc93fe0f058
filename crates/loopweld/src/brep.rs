//! Boundary-representation input: curves, edges and trimmed faces.
//!
//! Only the topology needed to rebuild planar faces is modeled. A face is
//! a list of loops; a loop is a list of trims; each trim names an edge,
//! and each edge names the 3D curve it runs along. Trim order carries no
//! meaning: loops are rebuilt by joining the curves' endpoints.

use loopweld_geom::Curve;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, LoopRef, Result};

/// Role of a loop within its face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopKind {
    /// The face's outer boundary.
    Outer,
    /// A hole in the face.
    Inner,
    /// Any other loop type (slits, curves on surface). Ignored.
    #[serde(other)]
    Other,
}

/// One use of an edge by a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrepTrim {
    /// Index into [`BrepInput::edges`].
    pub edge_index: usize,
}

/// A closed boundary of a face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrepLoop {
    /// Outer or inner.
    #[serde(rename = "type")]
    pub kind: LoopKind,
    /// Trims in any order.
    pub trims: Vec<BrepTrim>,
}

/// A trimmed face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrepFace {
    /// Boundary loops.
    pub loops: Vec<BrepLoop>,
}

/// An edge of the B-rep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrepEdge {
    /// Index into [`BrepInput::curves_3d`].
    pub curve_3d_index: usize,
}

/// A B-rep as delivered by a host application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrepInput {
    /// Edge geometry.
    #[serde(default)]
    pub curves_3d: Vec<Curve>,
    /// Edges.
    #[serde(default)]
    pub edges: Vec<BrepEdge>,
    /// Faces.
    #[serde(default)]
    pub faces: Vec<BrepFace>,
}

impl BrepInput {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The 3D curve behind a trim's edge.
    ///
    /// # Errors
    ///
    /// [`ConvertError::MissingEdge`] or [`ConvertError::MissingCurve`] for
    /// dangling indices; `at` is attached to the error.
    pub fn trim_curve(&self, trim: &BrepTrim, at: LoopRef) -> Result<&Curve> {
        let edge = self
            .edges
            .get(trim.edge_index)
            .ok_or(ConvertError::MissingEdge {
                at,
                edge: trim.edge_index,
            })?;
        self.curves_3d
            .get(edge.curve_3d_index)
            .ok_or(ConvertError::MissingCurve {
                at,
                edge: trim.edge_index,
                curve: edge.curve_3d_index,
            })
    }
}
