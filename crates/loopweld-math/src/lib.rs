#![warn(missing_docs)]

//! Math types for loopweld.
//!
//! Thin wrappers around nalgebra providing the point and vector types used
//! throughout the workspace, the linear tolerance, and the quantized
//! [`PointKey`] used to group approximately-equal endpoints.

use nalgebra::{Unit, Vector2, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D plane coordinates.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Largest number of decimal places a key may use.
///
/// Beyond this the scaled coordinates stop being representable in an f64
/// mantissa for model-sized values.
const MAX_DECIMAL_PLACES: i32 = 15;

/// Linear tolerance for geometric comparisons and endpoint grouping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Linear distance tolerance in model units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-6 model units).
    pub const DEFAULT: Self = Self { linear: 1e-6 };

    /// Tolerance with the given linear epsilon.
    pub const fn new(linear: f64) -> Self {
        Self { linear }
    }

    /// Whether the epsilon is usable (finite and strictly positive).
    pub fn is_valid(&self) -> bool {
        self.linear.is_finite() && self.linear > 0.0
    }

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Number of decimal places keys are rounded to: `round(-log10(ε))`.
    ///
    /// Clamped to `[-15, 15]` so that degenerate epsilons still produce a
    /// finite grid.
    pub fn decimal_places(&self) -> i32 {
        let places = (-self.linear.log10()).round();
        if places.is_nan() {
            return 0;
        }
        (places as i32).clamp(-MAX_DECIMAL_PLACES, MAX_DECIMAL_PLACES)
    }

    /// Snap a point to the tolerance grid.
    ///
    /// Each coordinate is scaled by `10^decimal_places` and rounded half
    /// away from zero. Points closer than ε usually share a key, but two
    /// points straddling a grid boundary can land in neighbouring cells.
    pub fn key(&self, p: &Point3) -> PointKey {
        let scale = 10f64.powi(self.decimal_places());
        PointKey {
            x: (p.x * scale).round() as i64,
            y: (p.y * scale).round() as i64,
            z: (p.z * scale).round() as i64,
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A point quantized to a tolerance grid.
///
/// Only ever used as a lookup key, never as geometry of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey {
    /// Scaled, rounded X coordinate.
    pub x: i64,
    /// Scaled, rounded Y coordinate.
    pub y: i64,
    /// Scaled, rounded Z coordinate.
    pub z: i64,
}

impl PointKey {
    /// Recover the grid point this key stands for.
    pub fn to_point(&self, tol: &Tolerance) -> Point3 {
        let scale = 10f64.powi(tol.decimal_places());
        Point3::new(
            self.x as f64 / scale,
            self.y as f64 / scale,
            self.z as f64 / scale,
        )
    }
}

/// Quantize `p` with tolerance `tol`. Shorthand for [`Tolerance::key`].
pub fn quantize(p: &Point3, tol: &Tolerance) -> PointKey {
    tol.key(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-7, 2.0, 3.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point3::new(1.001, 2.0, 3.0);
        assert!(!tol.points_equal(&a, &c));
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(Tolerance::DEFAULT.decimal_places(), 6);
        assert_eq!(Tolerance::new(1e-3).decimal_places(), 3);
        assert_eq!(Tolerance::new(1.0).decimal_places(), 0);
        assert_eq!(Tolerance::new(10.0).decimal_places(), -1);
        assert_eq!(Tolerance::new(1e-40).decimal_places(), 15);
    }

    #[test]
    fn test_nearby_points_share_key() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-8, 2.0 - 1e-8, 3.0);
        assert_eq!(tol.key(&a), tol.key(&b));
        let c = Point3::new(1.00001, 2.0, 3.0);
        assert_ne!(tol.key(&a), tol.key(&c));
        assert_eq!(quantize(&b, &tol), tol.key(&a));
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // ε = 1 gives zero decimal places, so the scaled coordinate is the
        // coordinate itself and every .5 below is exactly representable.
        let tol = Tolerance::new(1.0);
        let key_x = |x: f64| tol.key(&Point3::new(x, 0.0, 0.0)).x;

        assert_eq!(key_x(0.5), 1);
        assert_eq!(key_x(-0.5), -1);
        assert_eq!(key_x(1.5), 2);
        assert_eq!(key_x(2.5), 3);
        assert_eq!(key_x(-2.5), -3);

        // Exactly ε apart: different keys on this side of the boundary...
        assert_ne!(key_x(1.5), key_x(2.5));
        // ...and still different when straddling zero.
        assert_ne!(key_x(-0.5), key_x(0.5));
        // Less than ε apart inside one cell: same key.
        assert_eq!(key_x(0.6), key_x(1.4));
    }

    #[test]
    fn test_key_to_point() {
        let tol = Tolerance::new(1e-3);
        let key = tol.key(&Point3::new(1.23449, -0.0004, 7.0));
        let p = key.to_point(&tol);
        assert!((p.x - 1.234).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!((p.z - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_validity() {
        assert!(Tolerance::DEFAULT.is_valid());
        assert!(!Tolerance::new(0.0).is_valid());
        assert!(!Tolerance::new(-1e-6).is_valid());
        assert!(!Tolerance::new(f64::NAN).is_valid());
    }
}
