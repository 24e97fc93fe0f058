//! Boundary curve segments: lines and circular arcs.

use std::f64::consts::PI;

use loopweld_math::{Dir3, Point3, Tolerance, Vec3};
use serde::{Deserialize, Serialize};

use crate::plane::in_plane_axes;

/// A circular arc in 3D space.
///
/// Parameterization: `P(θ) = center + radius * (cos(θ) * x_dir + sin(θ) * y_dir)`
/// for `θ` running from `start_angle` to `end_angle`. The sweep is
/// counter-clockwise about `x_dir × y_dir` when `end_angle > start_angle`
/// and clockwise otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// Center of the arc.
    pub center: Point3,
    /// Reference direction for `θ = 0`.
    pub x_dir: Dir3,
    /// Second in-plane direction (perpendicular to `x_dir`).
    pub y_dir: Dir3,
    /// Radius.
    pub radius: f64,
    /// Angle of the start point, in radians.
    pub start_angle: f64,
    /// Angle of the end point, in radians.
    pub end_angle: f64,
}

impl Arc {
    /// Create an arc around `normal`. The in-plane frame is chosen arbitrarily.
    pub fn new(center: Point3, normal: Vec3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        let (x_dir, y_dir) = in_plane_axes(&Dir3::new_normalize(normal));
        Self {
            center,
            x_dir,
            y_dir,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// Create an arc with an explicit in-plane frame.
    ///
    /// `y_dir` only fixes the plane and the sense of rotation; it is
    /// re-orthogonalized against `x_dir`.
    pub fn from_frame(
        center: Point3,
        x_dir: Vec3,
        y_dir: Vec3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        let x = Dir3::new_normalize(x_dir);
        let n = x_dir.cross(&y_dir);
        let y = Dir3::new_normalize(n.cross(x.as_ref()));
        Self {
            center,
            x_dir: x,
            y_dir: y,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// Point on the arc's circle at angle `theta`.
    pub fn point_at(&self, theta: f64) -> Point3 {
        let (sin_t, cos_t) = theta.sin_cos();
        self.center + self.radius * (cos_t * self.x_dir.as_ref() + sin_t * self.y_dir.as_ref())
    }

    /// Start point.
    pub fn start(&self) -> Point3 {
        self.point_at(self.start_angle)
    }

    /// End point.
    pub fn end(&self) -> Point3 {
        self.point_at(self.end_angle)
    }

    /// Point halfway along the sweep.
    pub fn midpoint(&self) -> Point3 {
        self.point_at(0.5 * (self.start_angle + self.end_angle))
    }

    /// Signed sweep angle (`end_angle - start_angle`).
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Arc length.
    pub fn length(&self) -> f64 {
        self.radius.abs() * self.sweep().abs()
    }

    /// Unit normal of the arc's plane (`x_dir × y_dir`).
    pub fn normal(&self) -> Dir3 {
        Dir3::new_normalize(self.x_dir.as_ref().cross(self.y_dir.as_ref()))
    }

    /// Whether the sweep covers the whole circle.
    pub fn is_full_circle(&self) -> bool {
        self.sweep().abs() >= 2.0 * PI - 1e-12
    }

    /// The same arc traversed from end to start.
    pub fn reversed(&self) -> Self {
        Self {
            start_angle: self.end_angle,
            end_angle: self.start_angle,
            ..self.clone()
        }
    }
}

/// The kind of a [`Segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Straight line.
    Line,
    /// Circular arc.
    Arc,
}

/// A bounded boundary segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// A straight line from start to end.
    Line {
        /// Start point.
        start: Point3,
        /// End point.
        end: Point3,
    },
    /// A circular arc.
    Arc(Arc),
}

impl Segment {
    /// Line segment between two points.
    pub fn line(start: Point3, end: Point3) -> Self {
        Segment::Line { start, end }
    }

    /// The kind of this segment.
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Line { .. } => SegmentKind::Line,
            Segment::Arc(_) => SegmentKind::Arc,
        }
    }

    /// Get the start point of this segment.
    pub fn start(&self) -> Point3 {
        match self {
            Segment::Line { start, .. } => *start,
            Segment::Arc(arc) => arc.start(),
        }
    }

    /// Get the end point of this segment.
    pub fn end(&self) -> Point3 {
        match self {
            Segment::Line { end, .. } => *end,
            Segment::Arc(arc) => arc.end(),
        }
    }

    /// Get the length of this segment.
    pub fn length(&self) -> f64 {
        match self {
            Segment::Line { start, end } => (end - start).norm(),
            Segment::Arc(arc) => arc.length(),
        }
    }

    /// The same segment traversed from end to start.
    pub fn reversed(&self) -> Self {
        match self {
            Segment::Line { start, end } => Segment::Line {
                start: *end,
                end: *start,
            },
            Segment::Arc(arc) => Segment::Arc(arc.reversed()),
        }
    }

    /// Whether both endpoints have finite coordinates.
    pub fn is_finite(&self) -> bool {
        [self.start(), self.end()]
            .iter()
            .all(|p| p.coords.iter().all(|c| c.is_finite()))
    }

    /// Check if this segment is degenerate (zero length).
    pub fn is_degenerate(&self, tol: &Tolerance) -> bool {
        match self {
            Segment::Line { .. } => self.length() < tol.linear,
            Segment::Arc(arc) => arc.radius.abs() < tol.linear || arc.length() < tol.linear,
        }
    }
}
