//! Ordered segment chains and their conversion to polygon loops.

use loopweld_geom::{Polygon, Segment};
use loopweld_math::{Point3, Tolerance};

use crate::error::{JoinError, Result};

/// An ordered, endpoint-continuous sequence of segments.
///
/// For every adjacent pair `segments[i].end() ≈ segments[i + 1].start()`.
/// A closed chain additionally has `last.end() ≈ first.start()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    segments: Vec<Segment>,
    closed: bool,
}

impl Chain {
    pub(crate) fn new(segments: Vec<Segment>, closed: bool) -> Self {
        Self { segments, closed }
    }

    /// Segments in chain order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the chain has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the chain closes on itself.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Start point of the first segment.
    pub fn start(&self) -> Option<Point3> {
        self.segments.first().map(Segment::start)
    }

    /// End point of the last segment.
    pub fn end(&self) -> Option<Point3> {
        self.segments.last().map(Segment::end)
    }

    /// Each segment's start point, in chain order.
    ///
    /// For a closed chain this is the loop's vertex sequence; the final
    /// end point equals the first start and is not repeated.
    pub fn vertices(&self) -> Vec<Point3> {
        self.segments.iter().map(Segment::start).collect()
    }

    /// Whether every adjacent pair meets within the tolerance.
    pub fn is_continuous(&self, tol: &Tolerance) -> bool {
        let joined = self
            .segments
            .windows(2)
            .all(|w| tol.points_equal(&w[0].end(), &w[1].start()));
        if !self.closed {
            return joined;
        }
        match (self.start(), self.end()) {
            (Some(first), Some(last)) => joined && tol.points_equal(&last, &first),
            _ => joined,
        }
    }

    /// Turn a closed chain into a polygon loop.
    ///
    /// Arcs contribute only their start point.
    ///
    /// # Errors
    ///
    /// - [`JoinError::NotClosed`] for an open chain
    /// - [`JoinError::DegenerateLoop`] if the vertices do not form a valid
    ///   polygon (too few, collinear, or not planar)
    pub fn to_polygon(&self, tol: &Tolerance) -> Result<Polygon> {
        if !self.closed {
            return Err(JoinError::NotClosed);
        }
        Ok(Polygon::new(self.vertices(), tol)?)
    }
}
