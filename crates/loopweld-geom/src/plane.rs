//! Infinite planes with a local 2D frame.

use loopweld_math::{Dir3, Point2, Point3, Vec3};

/// An infinite plane defined by an origin point and a coordinate frame.
///
/// Parameterization: `P(u, v) = origin + u * x_dir + v * y_dir`
#[derive(Debug, Clone)]
pub struct Plane {
    /// Origin point on the plane.
    pub origin: Point3,
    /// Unit vector along the u direction.
    pub x_dir: Dir3,
    /// Unit vector along the v direction.
    pub y_dir: Dir3,
    /// Unit normal (x_dir × y_dir).
    pub normal_dir: Dir3,
}

impl Plane {
    /// Create a plane from origin and normal. The in-plane axes come from
    /// [`in_plane_axes`].
    pub fn from_normal(origin: Point3, normal: Vec3) -> Self {
        let normal_dir = Dir3::new_normalize(normal);
        let (x_dir, y_dir) = in_plane_axes(&normal_dir);
        Self {
            origin,
            x_dir,
            y_dir,
            normal_dir,
        }
    }

    /// Project a 3D point onto this plane's (u, v) parameter space.
    pub fn project(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.dot(self.x_dir.as_ref()), d.dot(self.y_dir.as_ref()))
    }

    /// Signed distance from a point to this plane.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        (p - self.origin).dot(self.normal_dir.as_ref())
    }
}

/// Unit axes `(x, y)` spanning the plane normal to `n`, with `x × y = n`.
///
/// `x` is seeded from the world axis along which `n` is smallest, so the
/// cross product never degenerates.
pub fn in_plane_axes(n: &Dir3) -> (Dir3, Dir3) {
    let a = n.abs();
    let seed = if a.x <= a.y && a.x <= a.z {
        Vec3::x()
    } else if a.y <= a.z {
        Vec3::y()
    } else {
        Vec3::z()
    };
    let x = Dir3::new_normalize(seed.cross(n.as_ref()));
    let y = Dir3::new_normalize(n.cross(x.as_ref()));
    (x, y)
}
