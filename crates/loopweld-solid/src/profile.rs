//! Planar face boundaries: an outer perimeter with optional voids.

use loopweld_geom::Polygon;
use serde::Serialize;

/// The boundary of one planar face.
///
/// The perimeter's winding fixes the face normal. Voids lie inside the
/// perimeter on the same plane; their winding is not constrained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    /// Outer loop.
    pub perimeter: Polygon,
    /// Holes in the face.
    pub voids: Vec<Polygon>,
}

impl Profile {
    /// Create a profile from a perimeter and its voids.
    pub fn new(perimeter: Polygon, voids: Vec<Polygon>) -> Self {
        Self { perimeter, voids }
    }

    /// A profile with no voids.
    pub fn simple(perimeter: Polygon) -> Self {
        Self::new(perimeter, Vec::new())
    }

    /// The same face facing the other way: every loop reversed.
    pub fn reversed(&self) -> Self {
        Self {
            perimeter: self.perimeter.reversed(),
            voids: self.voids.iter().map(Polygon::reversed).collect(),
        }
    }

    /// Face area: perimeter area minus void areas.
    pub fn area(&self) -> f64 {
        self.perimeter.area() - self.voids.iter().map(Polygon::area).sum::<f64>()
    }
}
