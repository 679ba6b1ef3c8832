//! Node arena and connectivity mutation.
//!
//! [`Graph`] owns every live [`Node`] in a dense store indexed by [`NodeId`]. All edge
//! mutation goes through it so that input slots and their mirrored output slots always
//! agree, and every node with outputs keeps exactly one trailing free output slot.
use tracing::{debug, warn};

use crate::error::{Error, Result, SlotDirection};
use crate::graph::{Endpoint, Node, NodeId, NodeKind};

/// Dense store of nodes with symmetric edge bookkeeping.
///
/// Removed nodes leave an empty entry behind so ids stay valid indices; the store grows
/// with the number of nodes ever created, not the number alive.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Option<Node>>,
    live: usize,
}

impl Graph {
    /// Creates a new, empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            live: 0,
        }
    }

    /// Insert a node of the given variant under the next free id.
    pub fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        debug!("Creating {} node {}.", kind.name(), id);
        self.nodes.push(Some(Node::new(id, kind)));
        self.live += 1;
        id
    }

    /// Sever all edges of `id` and remove it, returning the detached node.
    pub fn remove(&mut self, id: NodeId) -> Result<Node> {
        self.disconnect_all(id)?;
        let node = self
            .nodes
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(Error::UnknownNode(id))?;
        self.live -= 1;
        debug!("Removed node {}.", id);
        Ok(node)
    }

    /// Drop every node. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        for slot in &mut self.nodes {
            *slot = None;
        }
        self.live = 0;
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(Error::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.get_mut(id).ok_or(Error::UnknownNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    /// Id the next inserted node will receive.
    pub fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    /// Connect output `source_output` of `source` to input `target_input` of `target`.
    ///
    /// An existing edge on the target input is cleared first. Connecting through the
    /// trailing free slot grows the output array by one. Connecting through an occupied slot
    /// displaces its edge and overwrites the slot in place. Returns the output slot index
    /// that was used, which differs from `source_output` only when clearing the target's
    /// prior edge compacted the source's outputs.
    pub fn connect(
        &mut self,
        target: NodeId,
        target_input: usize,
        source: NodeId,
        source_output: usize,
    ) -> Result<usize> {
        let target_node = self.node(target)?;
        if target_input >= target_node.input_count() {
            return Err(target_node.slot_error(SlotDirection::Input, target_input));
        }
        let prior = target_node.inputs[target_input];
        let source_node = self.node(source)?;
        let displaced = source_node
            .outputs
            .get(source_output)
            .copied()
            .ok_or_else(|| source_node.slot_error(SlotDirection::Output, source_output))?;

        let edge = Endpoint::new(target, target_input);
        if prior == Some(Endpoint::new(source, source_output)) {
            return Ok(source_output);
        }

        self.disconnect_input(target, target_input)?;

        let slot = match displaced {
            None => {
                let source_node = self.node_mut(source)?;
                let free = source_node.outputs.len() - 1;
                source_node.outputs[free] = Some(edge);
                source_node.outputs.push(None);
                free
            }
            Some(old) => {
                // Compaction above may have moved the displaced edge.
                let source_node = self.node_mut(source)?;
                let Some(slot) = source_node.outputs.iter().position(|s| *s == Some(old)) else {
                    return Err(Error::Other(format!(
                        "output edge {}:{} of node {} vanished while connecting",
                        old.node, old.slot, source
                    )));
                };
                source_node.outputs[slot] = Some(edge);

                match self
                    .get_mut(old.node)
                    .and_then(|n| n.inputs.get_mut(old.slot))
                {
                    Some(input) => *input = None,
                    None => warn!("Edge references missing input {}:{}.", old.node, old.slot),
                }
                debug!(
                    "Displaced {}:{} -> {}:{}.",
                    source, slot, old.node, old.slot
                );
                slot
            }
        };

        self.node_mut(target)?.inputs[target_input] = Some(Endpoint::new(source, slot));

        debug!(
            "Connected {}:{} -> {}:{}.",
            source, slot, target, target_input
        );
        Ok(slot)
    }

    /// Clear input `slot` of `id` and compact the mirrored output array. No-op when the
    /// slot is unconnected.
    pub fn disconnect_input(&mut self, id: NodeId, slot: usize) -> Result<()> {
        let node = self.node_mut(id)?;
        if slot >= node.inputs.len() {
            return Err(node.slot_error(SlotDirection::Input, slot));
        }

        if let Some(source) = node.inputs[slot].take() {
            self.remove_output_entry(source.node, source.slot);
            debug!(
                "Disconnected {}:{} -> {}:{}.",
                source.node, source.slot, id, slot
            );
        }
        Ok(())
    }

    /// Remove the edge leaving output `slot` of `id`. No-op when the slot is free.
    pub fn disconnect_output(&mut self, id: NodeId, slot: usize) -> Result<()> {
        match self.node(id)?.output_slot(slot)? {
            Some(edge) => self.disconnect_input(edge.node, edge.slot),
            None => Ok(()),
        }
    }

    /// Disconnect every input and output edge of `id`.
    pub fn disconnect_all(&mut self, id: NodeId) -> Result<()> {
        let input_count = self.node(id)?.input_count();
        for slot in 0..input_count {
            self.disconnect_input(id, slot)?;
        }

        while let Some(edge) = self.node(id)?.outputs.iter().flatten().next().copied() {
            self.disconnect_input(edge.node, edge.slot)?;
        }
        Ok(())
    }

    /// Remove output entry `slot` of `source`, moving the last occupied entry into the gap
    /// and re-pointing its mirrored input.
    fn remove_output_entry(&mut self, source: NodeId, slot: usize) {
        let Some(node) = self.get_mut(source) else {
            warn!("Edge references missing node {}.", source);
            return;
        };
        let len = node.outputs.len();
        if len < 2 || slot >= len - 1 {
            warn!(
                "Output slot {} of node {} is not an occupied slot.",
                slot, source
            );
            return;
        }

        let last_occupied = len - 2;
        let moved = node.outputs[last_occupied].take();
        node.outputs.pop();
        if slot == last_occupied {
            return;
        }
        node.outputs[slot] = moved;

        if let Some(edge) = moved {
            match self
                .get_mut(edge.node)
                .and_then(|n| n.inputs.get_mut(edge.slot))
            {
                Some(input) => *input = Some(Endpoint::new(source, slot)),
                None => warn!("Edge references missing input {}:{}.", edge.node, edge.slot),
            }
        }
    }

    /// Check the slot invariants: every edge is mirrored on its peer, and every node with
    /// outputs has its occupied outputs packed in front of exactly one free slot.
    pub fn is_consistent(&self) -> bool {
        self.iter().all(|node| {
            let inputs_mirrored = node.inputs().iter().enumerate().all(|(i, slot)| match slot {
                Some(edge) => self
                    .get(edge.node)
                    .and_then(|peer| peer.outputs().get(edge.slot).copied().flatten())
                    == Some(Endpoint::new(node.id(), i)),
                None => true,
            });

            let outputs = node.outputs();
            let packed = match outputs.split_last() {
                Some((last, occupied)) => last.is_none() && occupied.iter().all(Option::is_some),
                None => !node.kind().has_outputs(),
            };

            let outputs_mirrored = outputs.iter().enumerate().all(|(j, slot)| match slot {
                Some(edge) => self
                    .get(edge.node)
                    .and_then(|peer| peer.inputs().get(edge.slot).copied().flatten())
                    == Some(Endpoint::new(node.id(), j)),
                None => true,
            });

            inputs_mirrored && packed && outputs_mirrored
        })
    }
}
