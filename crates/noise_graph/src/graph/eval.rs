//! Pull-based recursive evaluation of node fields.
//!
//! Evaluating a node evaluates whatever is attached to its inputs first, substituting `0.0`
//! for unconnected inputs. Nothing is cached: a node shared by several downstream paths is
//! recomputed once per path. Cycles are not detected and recurse without bound.
use tracing::warn;

use crate::error::Result;
use crate::graph::{Graph, Node, NodeId, NodeKind, GRADIENT_VALUE};

impl Graph {
    /// Evaluate the field of `id` at `(x, y, z)`.
    pub fn evaluate(&self, id: NodeId, x: f32, y: f32, z: f32) -> Result<f32> {
        let node = self.node(id)?;
        Ok(self.eval_node(node, x, y, z))
    }

    pub(crate) fn eval_node(&self, node: &Node, x: f32, y: f32, z: f32) -> f32 {
        let input = |slot: usize| self.eval_input(node, slot, x, y, z);

        match node.kind() {
            NodeKind::Perlin(generator) => generator.evaluate(x, y, z),
            NodeKind::Voronoi(generator) => generator.evaluate(x, y, z),
            NodeKind::Constant(params) => params.value,
            NodeKind::Gradient(_) => GRADIENT_VALUE,
            NodeKind::Abs => fold_abs(input(0)),
            NodeKind::Invert => 1.0 - input(0),
            NodeKind::Clamp(params) => params.apply(input(0)),
            NodeKind::Selector(params) => params.apply(input(0)),
            NodeKind::Combine(params) => {
                let a = input(0);
                let b = input(1);
                params.apply(a, b)
            }
            NodeKind::ImageOutput(_) => input(0),
        }
    }

    fn eval_input(&self, node: &Node, slot: usize, x: f32, y: f32, z: f32) -> f32 {
        let Some(edge) = node.inputs().get(slot).copied().flatten() else {
            return 0.0;
        };
        match self.get(edge.node) {
            Some(source) => self.eval_node(source, x, y, z),
            None => {
                warn!(
                    "Input {} of node {} references missing node {}.",
                    slot,
                    node.id(),
                    edge.node
                );
                0.0
            }
        }
    }
}

/// Fold values below `0.5` upward: `|v - 0.5| + 0.5`.
#[inline]
pub(crate) fn fold_abs(v: f32) -> f32 {
    (v - 0.5).abs() + 0.5
}
