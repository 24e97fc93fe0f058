#![warn(missing_docs)]

//! Geometry for loopweld.
//!
//! Provides the boundary segment sum type ([`Segment`]: lines and arcs),
//! the source [`Curve`] union a B-rep refers to, planar [`Polygon`] loops
//! with point containment, and the [`Ray`] used for face orientation.
//!
//! # Example
//!
//! ```
//! use loopweld_geom::Segment;
//! use loopweld_math::Point3;
//!
//! let seg = Segment::line(Point3::origin(), Point3::new(3.0, 4.0, 0.0));
//! let rev = seg.reversed();
//! assert_eq!(rev.start(), seg.end());
//! assert!((rev.length() - 5.0).abs() < 1e-12);
//! ```

pub mod curve;
pub mod plane;
pub mod polygon;
pub mod ray;
pub mod segment;

pub use curve::Curve;
pub use plane::{in_plane_axes, Plane};
pub use polygon::{dedup_sequential, Containment, Polygon, PolygonError};
pub use ray::{PolygonHit, Ray};
pub use segment::{Arc, Segment, SegmentKind};
