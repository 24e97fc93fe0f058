//! Splitting a fragment set into connected pieces.

use std::collections::HashSet;

use loopweld_geom::Segment;
use loopweld_math::{PointKey, Tolerance};

use crate::chain::Chain;
use crate::error::Result;
use crate::graph::SegmentGraph;

/// What makes two fragments the same, whatever their direction.
#[derive(Debug, PartialEq, Eq, Hash)]
enum FragmentKey {
    Line([PointKey; 2]),
    Arc {
        ends: [PointKey; 2],
        center: PointKey,
        midpoint: PointKey,
    },
}

impl FragmentKey {
    fn of(segment: &Segment, tol: &Tolerance) -> Self {
        let mut ends = [tol.key(&segment.start()), tol.key(&segment.end())];
        ends.sort_unstable();
        match segment {
            Segment::Line { .. } => FragmentKey::Line(ends),
            Segment::Arc(arc) => FragmentKey::Arc {
                ends,
                center: tol.key(&arc.center),
                midpoint: tol.key(&arc.midpoint()),
            },
        }
    }
}

/// Drop fragments that repeat an earlier one.
///
/// Lines match on their endpoint keys in either direction. Arcs also need
/// the same center and midpoint keys, which tells apart the two arcs of a
/// circle between the same endpoints. First occurrences are kept, in order.
pub fn dedup_fragments(segments: &[Segment], tol: Tolerance) -> Vec<Segment> {
    let mut seen = HashSet::new();
    segments
        .iter()
        .filter(|segment| seen.insert(FragmentKey::of(segment, &tol)))
        .cloned()
        .collect()
}

/// Group segment indices into connected components.
///
/// Two segments are connected when they share an endpoint key. Components
/// are ordered by their lowest segment index; indices inside a component
/// are sorted.
pub fn components(segments: &[Segment], tol: Tolerance) -> Vec<Vec<usize>> {
    let graph = SegmentGraph::build(segments, tol);
    let mut used = vec![false; segments.len()];
    let mut groups = Vec::new();

    for seed in 0..segments.len() {
        if used[seed] {
            continue;
        }

        used[seed] = true;
        let mut group = vec![seed];
        let mut stack = vec![seed];
        while let Some(i) = stack.pop() {
            let (k0, k1) = graph.segment_keys(i);
            for key in [k0, k1] {
                for &j in graph.node(&key).unwrap_or_default() {
                    if !used[j] {
                        used[j] = true;
                        group.push(j);
                        stack.push(j);
                    }
                }
            }
        }

        group.sort_unstable();
        groups.push(group);
    }
    groups
}

/// Join each connected component of `segments` on its own.
///
/// Useful when a fragment set holds several separate loops or chains that
/// [`join`](crate::join) would reject as a whole. Repeated fragments are
/// dropped first ([`dedup_fragments`]). Each component succeeds or fails
/// independently; results come in order of first appearance.
pub fn join_components(segments: &[Segment], tol: Tolerance) -> Vec<Result<Chain>> {
    let fragments = dedup_fragments(segments, tol);
    components(&fragments, tol)
        .into_iter()
        .map(|indices| {
            let part: Vec<Segment> = indices.iter().map(|&i| fragments[i].clone()).collect();
            crate::join(&part, tol)
        })
        .collect()
}
