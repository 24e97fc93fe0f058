#![warn(missing_docs)]

//! Planar B-rep to solid conversion.
//!
//! Host applications often export a B-rep whose face boundaries are an
//! unordered bag of trim curves with endpoints that only nearly meet. This
//! crate rebuilds each face loop by joining those curves
//! ([`loopweld_join`]), checks the result is a planar polygon, orients the
//! faces outward and assembles a [`Solid`] ([`loopweld_solid`]).
//!
//! # Example
//!
//! ```
//! use loopweld::{brep_to_solid, BrepInput, ConversionSettings};
//!
//! let json = r#"{
//!     "curves_3d": [
//!         { "type": "polyline", "points": [[0,0,0], [1,0,0], [0,1,0]], "closed": true }
//!     ],
//!     "edges": [ { "curve_3d_index": 0 } ],
//!     "faces": [ { "loops": [ { "type": "outer", "trims": [ { "edge_index": 0 } ] } ] } ]
//! }"#;
//!
//! let brep = BrepInput::from_json(json).unwrap();
//! let conversion = brep_to_solid(&brep, &ConversionSettings::default()).unwrap();
//! assert_eq!(conversion.solid.face_count(), 1);
//! ```

pub mod brep;
pub mod convert;
pub mod error;
pub mod settings;

pub use brep::{BrepEdge, BrepFace, BrepInput, BrepLoop, BrepTrim, LoopKind};
pub use convert::{
    brep_to_solid, face_profile, loop_polygon, loop_segments, Conversion, DroppedLoop,
    FaceProfile,
};
pub use error::{ConvertError, LoopRef, Result, SettingsError};
pub use settings::{ConversionSettings, DegenerateLoopPolicy};

pub use loopweld_geom::{Curve, Polygon, Segment};
pub use loopweld_join::{join, join_components, Chain, JoinError};
pub use loopweld_math::{Point3, Tolerance};
pub use loopweld_solid::{FaceParity, Profile, Solid};
