//! Endpoint graph: segments keyed by their quantized endpoints.

use std::collections::HashMap;

use loopweld_geom::Segment;
use loopweld_math::{PointKey, Tolerance};

use crate::error::{JoinError, Result};

/// Shape of a joinable segment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every node has two segments; the chain closes on itself.
    Closed,
    /// Two free ends, listed in node insertion order.
    Open {
        /// The two terminus keys.
        termini: [PointKey; 2],
    },
}

/// Map from quantized endpoint to the segments incident on it.
///
/// Each segment is registered under the key of its start and the key of its
/// end, in input order. A segment whose ends share a key is registered twice
/// on the same node. Nodes remember their insertion order so traversal is
/// deterministic.
#[derive(Debug, Clone)]
pub struct SegmentGraph<'a> {
    segments: &'a [Segment],
    tol: Tolerance,
    /// `(start key, end key)` per segment.
    keys: Vec<(PointKey, PointKey)>,
    /// Node keys in first-seen order.
    order: Vec<PointKey>,
    nodes: HashMap<PointKey, Vec<usize>>,
}

impl<'a> SegmentGraph<'a> {
    /// Build the graph for `segments`.
    pub fn build(segments: &'a [Segment], tol: Tolerance) -> Self {
        let mut keys = Vec::with_capacity(segments.len());
        let mut order = Vec::new();
        let mut nodes: HashMap<PointKey, Vec<usize>> = HashMap::new();

        for (i, seg) in segments.iter().enumerate() {
            let k0 = tol.key(&seg.start());
            let k1 = tol.key(&seg.end());
            for key in [k0, k1] {
                nodes
                    .entry(key)
                    .or_insert_with(|| {
                        order.push(key);
                        Vec::new()
                    })
                    .push(i);
            }
            keys.push((k0, k1));
        }

        Self {
            segments,
            tol,
            keys,
            order,
            nodes,
        }
    }

    /// The input segments.
    pub fn segments(&self) -> &'a [Segment] {
        self.segments
    }

    /// Tolerance the keys were built with.
    pub fn tolerance(&self) -> Tolerance {
        self.tol
    }

    /// Number of distinct endpoint keys.
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Segments incident on `key`, in input order.
    pub fn node(&self, key: &PointKey) -> Option<&[usize]> {
        self.nodes.get(key).map(Vec::as_slice)
    }

    /// All nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = (PointKey, &[usize])> + '_ {
        self.order
            .iter()
            .map(move |key| (*key, self.nodes[key].as_slice()))
    }

    /// `(start key, end key)` of segment `index`.
    pub fn segment_keys(&self, index: usize) -> (PointKey, PointKey) {
        self.keys[index]
    }

    /// Nodes with exactly one incident segment, in first-seen order.
    pub fn termini(&self) -> Vec<PointKey> {
        self.nodes()
            .filter(|(_, incident)| incident.len() == 1)
            .map(|(key, _)| key)
            .collect()
    }

    /// Decide whether the segments can form one simple chain.
    ///
    /// # Errors
    ///
    /// - [`JoinError::Empty`] if there are no segments
    /// - [`JoinError::NonFiniteEndpoint`] if a segment has a NaN or infinite
    ///   endpoint, whose key would be meaningless
    /// - [`JoinError::AmbiguousTopology`] if a node has more than two segments
    /// - [`JoinError::TooManyTermini`] if more than two nodes are free ends
    /// - [`JoinError::InconsistentTermini`] if exactly one node is a free end
    pub fn classify(&self) -> Result<Topology> {
        if self.segments.is_empty() {
            return Err(JoinError::Empty);
        }
        if let Some(index) = self.segments.iter().position(|s| !s.is_finite()) {
            return Err(JoinError::NonFiniteEndpoint(index));
        }

        if let Some((key, incident)) = self.nodes().find(|(_, incident)| incident.len() > 2) {
            return Err(JoinError::AmbiguousTopology {
                point: key.to_point(&self.tol),
                count: incident.len(),
            });
        }

        let termini = self.termini();
        match termini.as_slice() {
            [] => Ok(Topology::Closed),
            [a, b] => Ok(Topology::Open { termini: [*a, *b] }),
            // Degrees sum to an even number, so a lone terminus means the map is malformed.
            [_] => Err(JoinError::InconsistentTermini),
            more => Err(JoinError::TooManyTermini(more.len())),
        }
    }

    /// Working copy of the node map for a walk to consume.
    pub(crate) fn node_map(&self) -> HashMap<PointKey, Vec<usize>> {
        self.nodes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopweld_math::Point3;

    fn line(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::line(Point3::new(a.0, a.1, 0.0), Point3::new(b.0, b.1, 0.0))
    }

    #[test]
    fn test_square_is_closed() {
        let segs = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0, 0.0), (1.0, 1.0)),
            line((0.0, 1.0), (1.0, 1.0)),
            line((0.0, 0.0), (0.0, 1.0)),
        ];
        let graph = SegmentGraph::build(&segs, Tolerance::DEFAULT);
        assert_eq!(graph.node_count(), 4);
        assert!(graph.nodes().all(|(_, incident)| incident.len() == 2));
        assert_eq!(graph.classify(), Ok(Topology::Closed));
    }

    #[test]
    fn test_open_termini_in_insertion_order() {
        let segs = vec![
            line((1.0, 0.0), (2.0, 0.0)),
            line((0.0, 0.0), (1.0, 0.0)),
            line((2.0, 0.0), (3.0, 0.0)),
        ];
        let graph = SegmentGraph::build(&segs, Tolerance::DEFAULT);
        let tol = Tolerance::DEFAULT;
        let a = tol.key(&Point3::new(0.0, 0.0, 0.0));
        let d = tol.key(&Point3::new(3.0, 0.0, 0.0));
        assert_eq!(graph.classify(), Ok(Topology::Open { termini: [a, d] }));
    }

    #[test]
    fn test_near_endpoints_merge() {
        let segs = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0 + 1e-8, 0.0), (1.0, 1.0)),
        ];
        let graph = SegmentGraph::build(&segs, Tolerance::DEFAULT);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.termini().len(), 2);
    }

    #[test]
    fn test_branching_node_is_ambiguous() {
        let segs = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((0.0, 0.0), (0.0, 1.0)),
            line((0.0, 0.0), (-1.0, 0.0)),
        ];
        let graph = SegmentGraph::build(&segs, Tolerance::DEFAULT);
        match graph.classify() {
            Err(JoinError::AmbiguousTopology { point, count }) => {
                assert_eq!(count, 3);
                assert!(point.coords.norm() < 1e-12);
            }
            other => panic!("expected AmbiguousTopology, got {other:?}"),
        }
    }

    #[test]
    fn test_termini_counts() {
        let tol = Tolerance::DEFAULT;
        let two_apart = vec![line((0.0, 0.0), (1.0, 0.0)), line((5.0, 0.0), (6.0, 0.0))];
        assert_eq!(
            SegmentGraph::build(&two_apart, tol).classify(),
            Err(JoinError::TooManyTermini(4))
        );

        // A zero-length segment registers twice on its own node, next to a
        // line ending there: that node has degree 3.
        let stub = vec![line((0.0, 0.0), (1.0, 0.0)), line((1.0, 0.0), (1.0, 0.0))];
        assert!(matches!(
            SegmentGraph::build(&stub, tol).classify(),
            Err(JoinError::AmbiguousTopology { count: 3, .. })
        ));

        assert_eq!(SegmentGraph::build(&[], tol).classify(), Err(JoinError::Empty));
    }

    #[test]
    fn test_nan_endpoint_rejected() {
        // NaN casts to a zero key, which would tie it to the origin node.
        let segs = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0, 0.0), (f64::NAN, 0.0)),
            line((0.0, 0.0), (0.0, 0.0)),
        ];
        let graph = SegmentGraph::build(&segs, Tolerance::DEFAULT);
        assert_eq!(graph.classify(), Err(JoinError::NonFiniteEndpoint(1)));
    }
}
