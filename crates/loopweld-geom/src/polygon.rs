//! Planar polygon loops built from joined boundary vertices.

use loopweld_math::{Dir3, Point2, Point3, Tolerance, Vec3};
use serde::Serialize;
use thiserror::Error;

use crate::plane::Plane;

/// Reasons a vertex loop cannot form a polygon.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolygonError {
    /// Fewer than three distinct vertices remain after de-duplication.
    #[error("polygon needs at least 3 distinct vertices, got {0}")]
    TooFewVertices(usize),

    /// All vertices lie on one line (zero enclosed area).
    #[error("polygon vertices are collinear")]
    Collinear,

    /// A vertex lies off the polygon's best-fit plane.
    #[error("polygon is not planar: vertex deviates {0:.3e} from its plane")]
    NotPlanar(f64),
}

/// Where a point lies relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Strictly inside the polygon.
    Inside,
    /// Outside the polygon, or off its plane.
    Outside,
    /// On an edge or vertex, within tolerance.
    OnBoundary,
}

/// A closed, planar vertex loop.
///
/// The last vertex connects back to the first; the closing vertex is not
/// repeated. The normal follows the winding (right-hand rule).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    vertices: Vec<Point3>,
    normal: Dir3,
}

impl Polygon {
    /// Build a polygon from an ordered vertex loop.
    ///
    /// Sequential duplicates (including last-to-first) are removed first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - fewer than three distinct vertices remain
    /// - the vertices are collinear
    /// - a vertex is further than the tolerance from the polygon's plane
    pub fn new(vertices: Vec<Point3>, tol: &Tolerance) -> Result<Self, PolygonError> {
        let vertices = dedup_sequential(&vertices, true, tol);
        if vertices.len() < 3 {
            return Err(PolygonError::TooFewVertices(vertices.len()));
        }

        let newell = newell_normal(&vertices);
        let area = 0.5 * newell.norm();
        if area <= tol.linear * bbox_diagonal(&vertices) {
            return Err(PolygonError::Collinear);
        }

        let normal = Dir3::new_normalize(newell);
        let centroid = vertex_centroid(&vertices);
        let deviation = vertices
            .iter()
            .map(|v| (v - centroid).dot(normal.as_ref()).abs())
            .fold(0.0, f64::max);
        if deviation > tol.linear {
            return Err(PolygonError::NotPlanar(deviation));
        }

        Ok(Self { vertices, normal })
    }

    /// Vertices in loop order.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; a valid polygon has at least three vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Unit normal, right-handed with respect to the winding.
    pub fn normal(&self) -> Dir3 {
        self.normal
    }

    /// Area-weighted centroid of the enclosed region.
    ///
    /// Fan triangles from the first vertex are weighted by their signed
    /// area along the normal, so concave loops get the centroid of the
    /// region rather than of the corners. Falls back to the vertex average
    /// when the signed area vanishes.
    pub fn centroid(&self) -> Point3 {
        let Some(&origin) = self.vertices.first() else {
            return Point3::origin();
        };
        let n = self.normal.as_ref();
        let mut weighted = Vec3::zeros();
        let mut total = 0.0;
        for w in self.vertices[1..].windows(2) {
            let (a, b) = (w[0] - origin, w[1] - origin);
            let area = a.cross(&b).dot(n);
            total += area;
            weighted += area * (a + b);
        }
        if total.abs() < 1e-15 {
            return vertex_centroid(&self.vertices);
        }
        origin + weighted / (3.0 * total)
    }

    /// Enclosed area.
    pub fn area(&self) -> f64 {
        0.5 * newell_normal(&self.vertices).norm()
    }

    /// Edges as `(from, to)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Plane through the centroid with this polygon's normal.
    pub fn plane(&self) -> Plane {
        Plane::from_normal(self.centroid(), self.normal.into_inner())
    }

    /// The same loop wound the other way.
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self {
            vertices,
            normal: -self.normal,
        }
    }

    /// Classify `p` against this polygon.
    ///
    /// Points further than the tolerance from the polygon's plane are
    /// [`Containment::Outside`].
    pub fn contains(&self, p: &Point3, tol: &Tolerance) -> Containment {
        let plane = self.plane();
        if !tol.is_zero(plane.signed_distance(p)) {
            return Containment::Outside;
        }

        if self
            .edges()
            .any(|(a, b)| distance_to_segment(p, &a, &b) < tol.linear)
        {
            return Containment::OnBoundary;
        }

        let uv = plane.project(p);
        let ring: Vec<Point2> = self.vertices.iter().map(|v| plane.project(v)).collect();
        if point_in_polygon(&uv, &ring) {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }
}

/// Remove consecutive vertices closer than the tolerance.
///
/// With `wrap`, a last vertex coinciding with the first is dropped as well.
pub fn dedup_sequential(vertices: &[Point3], wrap: bool, tol: &Tolerance) -> Vec<Point3> {
    let Some(first) = vertices.first() else {
        return Vec::new();
    };
    let mut out = vec![*first];
    for (i, v) in vertices.iter().enumerate().skip(1) {
        let prev = out[out.len() - 1];
        if tol.points_equal(v, &prev) {
            continue;
        }
        if wrap && i == vertices.len() - 1 && tol.points_equal(v, first) {
            continue;
        }
        out.push(*v);
    }
    out
}

/// Newell's method: twice the vector area of the loop.
fn newell_normal(vertices: &[Point3]) -> Vec3 {
    let n = vertices.len();
    let mut normal = Vec3::zeros();
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

fn vertex_centroid(vertices: &[Point3]) -> Point3 {
    if vertices.is_empty() {
        return Point3::origin();
    }
    let sum = vertices.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / vertices.len() as f64)
}

fn bbox_diagonal(vertices: &[Point3]) -> f64 {
    let mut min = Vec3::repeat(f64::INFINITY);
    let mut max = Vec3::repeat(f64::NEG_INFINITY);
    for v in vertices {
        min = min.inf(&v.coords);
        max = max.sup(&v.coords);
    }
    (max - min).norm()
}

fn distance_to_segment(p: &Point3, a: &Point3, b: &Point3) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + t * ab)).norm()
}

/// Winding-number point-in-polygon test in 2D.
fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut winding = 0i32;
    let n = polygon.len();

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];

        if p1.y <= point.y {
            if p2.y > point.y && is_left(&p1, &p2, point) > 0.0 {
                winding += 1;
            }
        } else if p2.y <= point.y && is_left(&p1, &p2, point) < 0.0 {
            winding -= 1;
        }
    }

    winding != 0
}

/// Twice the signed area of the triangle (p0, p1, p2).
fn is_left(p0: &Point2, p1: &Point2, p2: &Point2) -> f64 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)
}
