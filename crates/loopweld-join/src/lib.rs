#![warn(missing_docs)]

//! Segment joining for loopweld.
//!
//! Takes an unordered set of boundary segments whose endpoints meet only
//! approximately and produces a single ordered [`Chain`], flipping
//! segments where needed so that each one starts where the previous one
//! ends. Closed chains turn into [`Polygon`](loopweld_geom::Polygon) loops
//! via [`Chain::to_polygon`].
//!
//! The pipeline is:
//!
//! 1. [`SegmentGraph::build`] groups endpoints by their quantized key
//! 2. [`SegmentGraph::classify`] decides between a closed loop and an open
//!    chain, rejecting branching or scattered input
//! 3. [`assemble`] walks the graph
//!
//! [`join`] runs all three. Fragment sets made of several separate pieces
//! go through [`join_components`] instead.
//!
//! # Example
//!
//! ```
//! use loopweld_geom::Segment;
//! use loopweld_join::join;
//! use loopweld_math::{Point3, Tolerance};
//!
//! let p = |x, y| Point3::new(x, y, 0.0);
//! let segments = vec![
//!     Segment::line(p(1.0, 0.0), p(0.0, 1.0)),
//!     Segment::line(p(0.0, 0.0), p(1.0, 0.0)),
//!     Segment::line(p(0.0, 0.0), p(0.0, 1.0)),
//! ];
//!
//! let chain = join(&segments, Tolerance::DEFAULT).unwrap();
//! assert!(chain.is_closed());
//! let triangle = chain.to_polygon(&Tolerance::DEFAULT).unwrap();
//! assert!((triangle.area() - 0.5).abs() < 1e-12);
//! ```

pub mod assemble;
pub mod chain;
pub mod components;
pub mod error;
pub mod graph;
pub mod observer;

pub use assemble::assemble;
pub use chain::Chain;
pub use components::{components, dedup_fragments, join_components};
pub use error::{JoinError, Result};
pub use graph::{SegmentGraph, Topology};
pub use observer::{JoinEvent, JoinObserver, LogObserver, NoopObserver};

use loopweld_geom::Segment;
use loopweld_math::Tolerance;

/// Join `segments` into a single chain.
///
/// # Errors
///
/// Any [`JoinError`] raised by classification or assembly.
pub fn join(segments: &[Segment], tol: Tolerance) -> Result<Chain> {
    join_observed(segments, tol, &mut NoopObserver)
}

/// [`join`], reporting progress to `observer`.
pub fn join_observed(
    segments: &[Segment],
    tol: Tolerance,
    observer: &mut dyn JoinObserver,
) -> Result<Chain> {
    let graph = SegmentGraph::build(segments, tol);
    observer.event(JoinEvent::GraphBuilt {
        segments: segments.len(),
        nodes: graph.node_count(),
    });

    let result = graph.classify().and_then(|topology| {
        observer.event(JoinEvent::Classified(&topology));
        assemble(&graph, topology, observer)
    });
    if let Err(err) = &result {
        observer.event(JoinEvent::Failed(err));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use loopweld_geom::{Arc, PolygonError};
    use loopweld_math::{Point3, Vec3};
    use std::collections::BTreeSet;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn permutations(n: usize) -> Vec<Vec<usize>> {
        if n == 0 {
            return vec![Vec::new()];
        }
        let mut out = Vec::new();
        for rest in permutations(n - 1) {
            for pos in 0..=rest.len() {
                let mut perm = rest.clone();
                perm.insert(pos, n - 1);
                out.push(perm);
            }
        }
        out
    }

    fn vertex_keys(chain: &Chain, tol: Tolerance) -> BTreeSet<loopweld_math::PointKey> {
        chain.vertices().iter().map(|v| tol.key(v)).collect()
    }

    #[test]
    fn test_square_every_order_and_direction() {
        let tol = Tolerance::DEFAULT;
        let corners = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let edges: Vec<Segment> = (0..4)
            .map(|i| Segment::line(corners[i], corners[(i + 1) % 4]))
            .collect();
        let expected: BTreeSet<_> = corners.iter().map(|c| tol.key(c)).collect();

        let perms = permutations(4);
        assert_eq!(perms.len(), 24);
        for perm in &perms {
            for flips in 0..16u32 {
                let input: Vec<Segment> = perm
                    .iter()
                    .enumerate()
                    .map(|(slot, &e)| {
                        if flips & (1 << slot) != 0 {
                            edges[e].reversed()
                        } else {
                            edges[e].clone()
                        }
                    })
                    .collect();

                let chain = join(&input, tol).unwrap();
                assert!(chain.is_closed());
                assert_eq!(chain.len(), 4);
                assert!(chain.is_continuous(&tol), "{perm:?} / {flips:#06b}");
                assert_eq!(vertex_keys(&chain, tol), expected);
                assert_abs_diff_eq!(chain.to_polygon(&tol).unwrap().area(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_ambiguous_node_every_order() {
        let arms = [
            Segment::line(p(0.0, 0.0), p(1.0, 0.0)),
            Segment::line(p(0.0, 0.0), p(0.0, 1.0)),
            Segment::line(p(0.0, 0.0), p(-1.0, 0.0)),
        ];
        for perm in permutations(3) {
            for flips in 0..8u32 {
                let input: Vec<Segment> = perm
                    .iter()
                    .enumerate()
                    .map(|(slot, &a)| {
                        if flips & (1 << slot) != 0 {
                            arms[a].reversed()
                        } else {
                            arms[a].clone()
                        }
                    })
                    .collect();
                match join(&input, Tolerance::DEFAULT) {
                    Err(JoinError::AmbiguousTopology { point, count }) => {
                        assert_eq!(count, 3);
                        assert!(Tolerance::DEFAULT.points_equal(&point, &p(0.0, 0.0)));
                    }
                    other => panic!("expected AmbiguousTopology, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_open_chain_from_free_start() {
        // A → B → C given out of order.
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(1.0, 2.0));
        let input = vec![Segment::line(b, c), Segment::line(a, b)];
        let chain = join(&input, Tolerance::DEFAULT).unwrap();
        assert!(!chain.is_closed());
        assert_eq!(chain.start(), Some(a));
        assert_eq!(chain.end(), Some(c));
        assert!(chain.is_continuous(&Tolerance::DEFAULT));

        let three = vec![
            Segment::line(b, c),
            Segment::line(p(1.0, 2.0), p(3.0, 2.0)),
            Segment::line(a, b),
        ];
        let chain = join(&three, Tolerance::DEFAULT).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.segments()[0], three[2]);
        assert!(chain.is_continuous(&Tolerance::DEFAULT));
    }

    #[test]
    fn test_shared_start_reverses_one() {
        // Two lines both starting at P, closed off by an arc.
        let tol = Tolerance::DEFAULT;
        let origin = p(0.0, 0.0);
        let input = vec![
            Segment::line(origin, p(1.0, 0.0)),
            Segment::line(origin, p(0.0, 1.0)),
            Segment::Arc(Arc::from_frame(
                origin,
                Vec3::x(),
                Vec3::y(),
                1.0,
                0.0,
                std::f64::consts::FRAC_PI_2,
            )),
        ];
        let chain = join(&input, tol).unwrap();
        assert!(chain.is_closed());
        assert!(chain.is_continuous(&tol));

        let lines: Vec<&Segment> = chain
            .segments()
            .iter()
            .filter(|s| matches!(s, Segment::Line { .. }))
            .collect();
        let flipped = lines.iter().filter(|s| !input.contains(**s)).count();
        assert_eq!(flipped, 1);
        assert!(tol.points_equal(&chain.segments()[0].end(), &chain.segments()[1].start()));
    }

    #[test]
    fn test_near_miss_endpoints_join() {
        let tol = Tolerance::new(1e-3);
        let input = vec![
            Segment::line(p(0.0, 0.0), p(2.0, 0.0)),
            Segment::line(p(2.0001, 0.0), p(1.0, 1.0)),
            Segment::line(p(0.0, 0.0002), p(1.0, 1.0001)),
        ];
        let chain = join(&input, tol).unwrap();
        assert!(chain.is_closed());
        assert_eq!(chain.to_polygon(&tol).unwrap().len(), 3);
    }

    #[test]
    fn test_collinear_loop_degenerates() {
        let input = vec![
            Segment::line(p(0.0, 0.0), p(1.0, 0.0)),
            Segment::line(p(2.0, 0.0), p(1.0, 0.0)),
            Segment::line(p(2.0, 0.0), p(0.0, 0.0)),
        ];
        let chain = join(&input, Tolerance::DEFAULT).unwrap();
        assert_eq!(
            chain.to_polygon(&Tolerance::DEFAULT),
            Err(JoinError::DegenerateLoop(PolygonError::Collinear))
        );
    }

    #[test]
    fn test_observed_failure_reported() {
        let mut failed = None;
        let mut built = None;
        let mut observer = |event: JoinEvent<'_>| match event {
            JoinEvent::GraphBuilt { segments, nodes } => built = Some((segments, nodes)),
            JoinEvent::Failed(err) => failed = Some(err.clone()),
            _ => {}
        };
        let input = vec![
            Segment::line(p(0.0, 0.0), p(1.0, 0.0)),
            Segment::line(p(3.0, 0.0), p(4.0, 0.0)),
        ];
        let result = join_observed(&input, Tolerance::DEFAULT, &mut observer);
        assert_eq!(result, Err(JoinError::TooManyTermini(4)));
        assert_eq!(built, Some((2, 4)));
        assert_eq!(failed, Some(JoinError::TooManyTermini(4)));
    }
}
