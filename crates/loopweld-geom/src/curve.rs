//! Source curves as supplied by a B-rep, before they are split into segments.

use std::f64::consts::PI;

use loopweld_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::segment::{Arc, Segment};

/// A 3D curve referenced by a B-rep edge.
///
/// Only lines and arcs take part in joining; the compound kinds are
/// exploded into those by [`Curve::to_segments`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curve {
    /// A straight line.
    Line {
        /// Start point.
        start: Point3,
        /// End point.
        end: Point3,
    },
    /// A circular arc.
    Arc(Arc),
    /// A chain of straight lines through `points`.
    Polyline {
        /// Vertices in order.
        points: Vec<Point3>,
        /// If true, an extra line runs from the last point back to the first.
        #[serde(default)]
        closed: bool,
    },
    /// A full circle.
    Circle {
        /// Center.
        center: Point3,
        /// Plane normal.
        normal: Vec3,
        /// Radius.
        radius: f64,
    },
    /// A sequence of sub-curves.
    Polycurve {
        /// Sub-curves in order.
        segments: Vec<Curve>,
    },
}

impl Curve {
    /// Split this curve into line and arc segments, in curve order.
    ///
    /// A circle becomes a single full-sweep arc whose start and end coincide.
    pub fn to_segments(&self) -> Vec<Segment> {
        let mut out = Vec::new();
        self.push_segments(&mut out);
        out
    }

    fn push_segments(&self, out: &mut Vec<Segment>) {
        match self {
            Curve::Line { start, end } => out.push(Segment::line(*start, *end)),
            Curve::Arc(arc) => out.push(Segment::Arc(arc.clone())),
            Curve::Polyline { points, closed } => {
                out.extend(points.windows(2).map(|w| Segment::line(w[0], w[1])));
                if *closed && points.len() > 2 {
                    out.push(Segment::line(points[points.len() - 1], points[0]));
                }
            }
            Curve::Circle {
                center,
                normal,
                radius,
            } => out.push(Segment::Arc(Arc::new(*center, *normal, *radius, 0.0, 2.0 * PI))),
            Curve::Polycurve { segments } => {
                for curve in segments {
                    curve.push_segments(out);
                }
            }
        }
    }

    /// Total length of the curve.
    pub fn length(&self) -> f64 {
        self.to_segments().iter().map(Segment::length).sum()
    }
}
