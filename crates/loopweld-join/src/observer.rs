//! Trace hook for the joining algorithm.
//!
//! The algorithm itself never logs. Callers that want to follow a join
//! pass a [`JoinObserver`]; [`LogObserver`] forwards every event to the
//! `log` facade.

use loopweld_math::PointKey;

use crate::error::JoinError;
use crate::graph::Topology;

/// A structured event emitted while joining.
#[derive(Debug, Clone, Copy)]
pub enum JoinEvent<'a> {
    /// The endpoint graph was built.
    GraphBuilt {
        /// Input segment count.
        segments: usize,
        /// Distinct endpoint keys.
        nodes: usize,
    },
    /// The segment set was classified.
    Classified(&'a Topology),
    /// The walk picked its first segment.
    Started {
        /// Input index of the segment.
        segment: usize,
        /// Whether it was flipped to start at a free end.
        reversed: bool,
    },
    /// The walk crossed a node and appended a segment.
    Stepped {
        /// Node that was crossed.
        junction: PointKey,
        /// Input index of the appended segment.
        segment: usize,
        /// Whether the segment was flipped to continue the chain.
        reversed: bool,
    },
    /// The chain is complete.
    Joined {
        /// Segments in the chain.
        segments: usize,
        /// Whether the chain closes on itself.
        closed: bool,
    },
    /// Joining stopped with an error.
    Failed(&'a JoinError),
}

/// Receives [`JoinEvent`]s.
pub trait JoinObserver {
    /// Called once per event, in algorithm order.
    fn event(&mut self, event: JoinEvent<'_>);
}

impl<F: FnMut(JoinEvent<'_>)> JoinObserver for F {
    fn event(&mut self, event: JoinEvent<'_>) {
        self(event)
    }
}

/// Discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl JoinObserver for NoopObserver {
    fn event(&mut self, _event: JoinEvent<'_>) {}
}

/// Forwards events to the `log` crate under the `loopweld_join` target.
///
/// Per-step events go to `trace`, summaries to `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl JoinObserver for LogObserver {
    fn event(&mut self, event: JoinEvent<'_>) {
        match event {
            JoinEvent::GraphBuilt { segments, nodes } => {
                log::debug!("joining {segments} segments over {nodes} nodes")
            }
            JoinEvent::Classified(topology) => log::debug!("segment set is {topology:?}"),
            JoinEvent::Started { segment, reversed } => {
                log::trace!("start at segment {segment} (reversed: {reversed})")
            }
            JoinEvent::Stepped {
                junction,
                segment,
                reversed,
            } => log::trace!(
                "node ({}, {}, {}) -> segment {segment} (reversed: {reversed})",
                junction.x,
                junction.y,
                junction.z
            ),
            JoinEvent::Joined { segments, closed } => {
                log::debug!("joined {segments} segments (closed: {closed})")
            }
            JoinEvent::Failed(err) => log::debug!("join failed: {err}"),
        }
    }
}
