//! Event types and sinks for observing graph mutations.
//!
//! A [`crate::workspace::Workspace`] emits a [`GraphEvent`] after every successful
//! mutation so that a host can decide when previews need re-rendering.
use std::mem;

use crate::graph::NodeId;

/// Describes a completed change to the graph.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    /// A node was created, pasted, or cloned.
    NodeCreated {
        id: NodeId,
        /// Display name of the new node.
        name: String,
    },

    /// A node and all of its edges were removed.
    NodeDeleted { id: NodeId },

    /// An edge was added from `source:output` to `target:input`.
    Connected {
        target: NodeId,
        input: usize,
        source: NodeId,
        /// Output slot the edge landed in.
        output: usize,
    },

    /// The edge feeding `target:input` was removed.
    Disconnected { target: NodeId, input: usize },

    /// Parameters or name of a node changed.
    NodeEdited { id: NodeId },

    /// A node was restored to its default parameters.
    NodeReset { id: NodeId },

    /// Every node was removed.
    Cleared,
}

impl GraphEvent {
    /// Node whose output may have changed, if the event concerns a single node. For edge
    /// changes this is the target, since the source's field is unaffected.
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            GraphEvent::NodeCreated { id, .. }
            | GraphEvent::NodeDeleted { id }
            | GraphEvent::NodeEdited { id }
            | GraphEvent::NodeReset { id } => Some(id),
            GraphEvent::Connected { target, .. } | GraphEvent::Disconnected { target, .. } => {
                Some(target)
            }
            GraphEvent::Cleared => None,
        }
    }
}

/// A generic event sink that accepts [`GraphEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GraphEvent);
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GraphEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GraphEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GraphEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GraphEvent),
{
    #[inline]
    fn send(&mut self, event: GraphEvent) {
        (self.f)(event);
    }
}

/// An event sink that queues events until the host drains them, typically once per frame.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<GraphEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<GraphEvent> {
        self.events
    }

    /// Events queued since the last drain.
    pub fn pending(&self) -> &[GraphEvent] {
        &self.events
    }

    /// Take every queued event, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<GraphEvent> {
        mem::take(&mut self.events)
    }

    /// Whether any queued event names `id`. A cleared graph counts for every node.
    /// Upstream changes that only reach `id` through edges are not tracked.
    pub fn mentions(&self, id: NodeId) -> bool {
        self.events
            .iter()
            .any(|event| event.node().is_none_or(|node| node == id))
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GraphEvent) {
        self.events.push(event);
    }
}
