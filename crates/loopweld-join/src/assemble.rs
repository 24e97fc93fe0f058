//! Path assembly: walk a classified [`SegmentGraph`] into a single [`Chain`].

use loopweld_math::PointKey;

use crate::chain::Chain;
use crate::error::{JoinError, Result};
use crate::graph::{SegmentGraph, Topology};
use crate::observer::{JoinEvent, JoinObserver};

/// A segment placed in the chain: input index plus orientation.
#[derive(Debug, Clone, Copy)]
struct Placed {
    index: usize,
    reversed: bool,
}

impl Placed {
    /// `(start key, end key)` in chain direction.
    fn keys(&self, graph: &SegmentGraph<'_>) -> (PointKey, PointKey) {
        let (k0, k1) = graph.segment_keys(self.index);
        if self.reversed {
            (k1, k0)
        } else {
            (k0, k1)
        }
    }
}

/// Walk `graph` into one ordered chain.
///
/// `topology` must come from [`SegmentGraph::classify`] on the same graph.
/// Every input segment appears exactly once, flipped where needed so each
/// segment starts where the previous one ended.
///
/// Start: an open set starts at the first terminus whose segment begins
/// there (falling back to the first terminus with its segment reversed);
/// a closed set starts with the first segment of the first node.
///
/// At each node the first incident segment in input order is taken that is
/// not the current one and whose far end is not the current segment's
/// start.
///
/// # Errors
///
/// [`JoinError::BrokenChain`] if the walk cannot continue or leaves nodes
/// unvisited. After a successful classification this happens only for
/// input made of several disconnected pieces, or for a two-segment loop.
pub fn assemble(
    graph: &SegmentGraph<'_>,
    topology: Topology,
    observer: &mut dyn JoinObserver,
) -> Result<Chain> {
    let segments = graph.segments();
    let total = segments.len();
    let broken = |joined: usize, reason: &'static str| JoinError::BrokenChain {
        joined,
        total,
        reason,
    };

    let mut nodes = graph.node_map();
    let mut used = vec![false; total];
    let mut placed: Vec<Placed> = Vec::with_capacity(total);

    let first = start_segment(graph, topology).ok_or_else(|| broken(0, "no start segment"))?;
    observer.event(JoinEvent::Started {
        segment: first.index,
        reversed: first.reversed,
    });
    nodes.remove(&first.keys(graph).0);
    used[first.index] = true;
    placed.push(first);

    while placed.len() < total {
        let current = placed[placed.len() - 1];
        let (current_start, junction) = current.keys(graph);

        let candidates = nodes
            .get(&junction)
            .ok_or_else(|| broken(placed.len(), "no node at segment end"))?;

        let next = candidates
            .iter()
            .copied()
            .find(|&i| {
                let (k0, k1) = graph.segment_keys(i);
                let far = if k0 == junction { k1 } else { k0 };
                i != current.index && far != current_start
            })
            .ok_or_else(|| broken(placed.len(), "no continuation at node"))?;

        if used[next] {
            return Err(broken(placed.len(), "segment reached twice"));
        }

        let step = Placed {
            index: next,
            reversed: graph.segment_keys(next).0 != junction,
        };
        observer.event(JoinEvent::Stepped {
            junction,
            segment: step.index,
            reversed: step.reversed,
        });

        nodes.remove(&step.keys(graph).0);
        used[next] = true;
        placed.push(step);
    }

    // Closed: every node consumed. Open: only the far terminus remains.
    let closed = matches!(topology, Topology::Closed);
    let consumed = if closed {
        nodes.is_empty()
    } else {
        let end = placed[placed.len() - 1].keys(graph).1;
        nodes.len() == 1 && nodes.contains_key(&end)
    };
    if !consumed {
        return Err(broken(placed.len(), "nodes left unvisited"));
    }

    let chain: Vec<_> = placed
        .iter()
        .map(|p| {
            let seg = &segments[p.index];
            if p.reversed {
                seg.reversed()
            } else {
                seg.clone()
            }
        })
        .collect();

    observer.event(JoinEvent::Joined {
        segments: chain.len(),
        closed,
    });
    Ok(Chain::new(chain, closed))
}

fn start_segment(graph: &SegmentGraph<'_>, topology: Topology) -> Option<Placed> {
    match topology {
        Topology::Open { termini } => {
            let at = |key: &PointKey| graph.node(key).and_then(|incident| incident.first().copied());
            termini
                .iter()
                .find_map(|key| {
                    at(key)
                        .filter(|&i| graph.segment_keys(i).0 == *key)
                        .map(|index| Placed {
                            index,
                            reversed: false,
                        })
                })
                .or_else(|| {
                    at(&termini[0]).map(|index| Placed {
                        index,
                        reversed: true,
                    })
                })
        }
        Topology::Closed => graph
            .nodes()
            .next()
            .and_then(|(_, incident)| incident.first().copied())
            .map(|index| Placed {
                index,
                reversed: false,
            }),
    }
}
