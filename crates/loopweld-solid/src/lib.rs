#![warn(missing_docs)]

//! Solid assembly for loopweld.
//!
//! Takes planar face [`Profile`]s, fixes faces that point into the solid
//! ([`orient`]) and collects them into a [`Solid`] with shared vertices
//! ([`build_solid`]).

pub mod orient;
pub mod profile;
pub mod solid;

pub use orient::{apply_parity, classify_orientation, orient, FaceParity};
pub use profile::Profile;
pub use solid::{build_solid, Face, FaceId, Solid, VertexId};
