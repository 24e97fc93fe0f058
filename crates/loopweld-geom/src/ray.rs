//! Rays and ray-polygon intersection.

use loopweld_math::{Dir3, Point3, Tolerance, Vec3};

use crate::plane::Plane;
use crate::polygon::{Containment, Polygon};

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Dir3,
}

/// Where a ray meets a polygon's plane, and how that point relates to the polygon.
#[derive(Debug, Clone, Copy)]
pub struct PolygonHit {
    /// Parameter along the ray.
    pub t: f64,
    /// Intersection point.
    pub point: Point3,
    /// Classification of `point` against the polygon.
    pub containment: Containment,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: Dir3::new_normalize(direction),
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }

    /// Intersect with a plane.
    ///
    /// Returns the ray parameter, or `None` if the ray is parallel to the
    /// plane or the plane lies behind the origin.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<f64> {
        let normal = plane.normal_dir.as_ref();
        let denom = self.direction.as_ref().dot(normal);

        // Ray is parallel to plane
        if denom.abs() < 1e-12 {
            return None;
        }

        let t = (plane.origin - self.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }
        Some(t)
    }

    /// Intersect with a polygon's plane and classify the hit.
    ///
    /// Hits within the tolerance of the origin are ignored, so a ray cast
    /// from a face does not hit faces touching its origin.
    pub fn intersect_polygon(&self, polygon: &Polygon, tol: &Tolerance) -> Option<PolygonHit> {
        let t = self.intersect_plane(&polygon.plane())?;
        if t <= tol.linear {
            return None;
        }
        let point = self.at(t);
        Some(PolygonHit {
            t,
            point,
            containment: polygon.contains(&point, tol),
        })
    }
}
