//! Editing session around a [`Graph`].
//!
//! A [`Workspace`] owns the graph together with the editor state that sits on top of it:
//! the current [`Selection`], a single-node clipboard and an optional locked preview node.
//! Every successful mutation is reported to an [`EventSink`].
use std::mem;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{Error, Result, SlotDirection};
use crate::export::{ImageEncoder, PixelLayout, PreviewSurface};
use crate::graph::{Graph, Heightmap, Node, NodeId, NodeKind};

pub mod config;
pub mod events;

pub use config::WorkspaceConfig;
pub use events::{EventSink, FnSink, GraphEvent, VecSink};

/// What the editor currently has selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Node(NodeId),
    InputSlot {
        node: NodeId,
        slot: usize,
    },
    OutputSlot {
        node: NodeId,
        slot: usize,
    },
}

impl Selection {
    /// Node the selection refers to, whether whole or by slot.
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Selection::None => None,
            Selection::Node(id)
            | Selection::InputSlot { node: id, .. }
            | Selection::OutputSlot { node: id, .. } => Some(id),
        }
    }
}

/// A node graph plus selection, clipboard and preview state.
#[derive(Debug)]
pub struct Workspace<S: EventSink = ()> {
    graph: Graph,
    config: WorkspaceConfig,
    selection: Selection,
    clipboard: Option<NodeKind>,
    preview: Option<NodeId>,
    sink: S,
}

impl Workspace {
    /// Creates an empty workspace with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(WorkspaceConfig::default(), ())
    }

    pub fn try_new(config: WorkspaceConfig) -> Result<Self> {
        Self::with_event_sink(config, ())
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> Workspace<S> {
    /// Creates an empty workspace reporting mutations to `sink`.
    pub fn with_event_sink(config: WorkspaceConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, sink))
    }

    fn from_parts(config: WorkspaceConfig, sink: S) -> Self {
        Self {
            graph: Graph::new(),
            config,
            selection: Selection::None,
            clipboard: None,
            preview: None,
            sink,
        }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn event_sink(&self) -> &S {
        &self.sink
    }

    pub fn event_sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_event_sink(self) -> S {
        self.sink
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.get(id)
    }

    /// Live nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.iter()
    }

    // Graph mutation

    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.graph.insert(kind);
        self.emit_created(id);
        id
    }

    /// Sever every edge of `id` and remove it. A selection or preview lock on the node is
    /// released.
    pub fn delete_node(&mut self, id: NodeId) -> Result<()> {
        self.graph.remove(id)?;
        if self.selection.node() == Some(id) {
            self.selection = Selection::None;
        }
        if self.preview == Some(id) {
            self.preview = None;
        }
        self.sink.send(GraphEvent::NodeDeleted { id });
        Ok(())
    }

    /// See [`Graph::connect`]. Returns the output slot the edge landed in.
    pub fn connect(
        &mut self,
        target: NodeId,
        target_input: usize,
        source: NodeId,
        source_output: usize,
    ) -> Result<usize> {
        let output = self
            .graph
            .connect(target, target_input, source, source_output)?;
        self.sink.send(GraphEvent::Connected {
            target,
            input: target_input,
            source,
            output,
        });
        Ok(output)
    }

    /// Remove the edge feeding input `target_input` of `target`, if any.
    pub fn disconnect(&mut self, target: NodeId, target_input: usize) -> Result<()> {
        let was_connected = self.graph.node(target)?.is_input_connected(target_input)?;
        self.graph.disconnect_input(target, target_input)?;
        if was_connected {
            self.sink.send(GraphEvent::Disconnected {
                target,
                input: target_input,
            });
        }
        Ok(())
    }

    /// Remove the edge leaving output `slot` of `node`, if any.
    pub fn disconnect_output(&mut self, node: NodeId, slot: usize) -> Result<()> {
        match self.graph.node(node)?.output_slot(slot)? {
            Some(edge) => self.disconnect(edge.node, edge.slot),
            None => Ok(()),
        }
    }

    /// Edit the parameters of `id` in place.
    ///
    /// The closure works on a copy; if it swaps the node for a different variant the edit is
    /// rejected and the node is left untouched, since the slot layout depends on the variant.
    pub fn edit_node(&mut self, id: NodeId, edit: impl FnOnce(&mut NodeKind)) -> Result<()> {
        let node = self.graph.node_mut(id)?;
        let mut kind = node.kind().clone();
        edit(&mut kind);
        if mem::discriminant(&kind) != mem::discriminant(node.kind()) {
            return Err(Error::Other(format!(
                "cannot change node {} from {} to {}",
                id,
                node.kind().name(),
                kind.name()
            )));
        }
        *node.kind_mut() = kind;
        self.sink.send(GraphEvent::NodeEdited { id });
        Ok(())
    }

    pub fn rename_node(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        self.graph.node_mut(id)?.set_name(name.into());
        self.sink.send(GraphEvent::NodeEdited { id });
        Ok(())
    }

    /// Duplicate `id` under a fresh id with the same name and parameters and no edges.
    pub fn clone_node(&mut self, id: NodeId) -> Result<NodeId> {
        let original = self.graph.node(id)?;
        let kind = original.kind().clone();
        let name = original.name().to_string();

        let copy = self.graph.insert(kind);
        self.graph.node_mut(copy)?.set_name(name);
        debug!("Cloned node {} into {}.", id, copy);
        self.emit_created(copy);
        Ok(copy)
    }

    /// Restore the default parameters of `id`. Edges are kept.
    pub fn reset_node(&mut self, id: NodeId) -> Result<()> {
        self.graph.node_mut(id)?.kind_mut().reset();
        self.sink.send(GraphEvent::NodeReset { id });
        Ok(())
    }

    /// Drop every node and all editor state. Ids keep counting.
    pub fn reset(&mut self) {
        self.graph.clear();
        self.selection = Selection::None;
        self.clipboard = None;
        self.preview = None;
        debug!("Workspace reset.");
        self.sink.send(GraphEvent::Cleared);
    }

    fn emit_created(&mut self, id: NodeId) {
        if let Some(node) = self.graph.get(id) {
            let name = node.name().to_string();
            self.sink.send(GraphEvent::NodeCreated { id, name });
        }
    }

    // Evaluation

    pub fn evaluate(&self, id: NodeId, x: f32, y: f32, z: f32) -> Result<f32> {
        self.graph.evaluate(id, x, y, z)
    }

    /// See [`Graph::render`]. Sizes above the configured `max_image_size` are rejected.
    pub fn render(&self, id: NodeId, size: u32) -> Result<Vec<u8>> {
        self.check_size(size)?;
        self.graph.render(id, size)
    }

    /// See [`Graph::sample_heightmap`]. Bounded like [`Workspace::render`].
    pub fn sample_heightmap(&self, id: NodeId, size: u32) -> Result<Heightmap> {
        self.check_size(size)?;
        self.graph.sample_heightmap(id, size)
    }

    fn check_size(&self, size: u32) -> Result<()> {
        if size > self.config.max_image_size {
            return Err(Error::InvalidConfig(format!(
                "size {} exceeds max_image_size {}",
                size, self.config.max_image_size
            )));
        }
        Ok(())
    }

    // Selection

    pub fn select_node(&mut self, id: NodeId) -> Result<()> {
        self.graph.node(id)?;
        self.selection = Selection::Node(id);
        Ok(())
    }

    pub fn select_input_slot(&mut self, node: NodeId, slot: usize) -> Result<()> {
        let n = self.graph.node(node)?;
        if slot >= n.input_count() {
            return Err(n.slot_error(SlotDirection::Input, slot));
        }
        self.selection = Selection::InputSlot { node, slot };
        Ok(())
    }

    pub fn select_output_slot(&mut self, node: NodeId, slot: usize) -> Result<()> {
        let n = self.graph.node(node)?;
        if slot >= n.output_count() {
            return Err(n.slot_error(SlotDirection::Output, slot));
        }
        self.selection = Selection::OutputSlot { node, slot };
        Ok(())
    }

    pub fn unselect(&mut self) {
        self.selection = Selection::None;
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Node of the current selection, including slot selections.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.selection.node()
    }

    // Clipboard

    /// Snapshot the selected node's variant and parameters. Returns `false` when nothing is
    /// selected.
    pub fn copy(&mut self) -> bool {
        let Some(node) = self.selected_node().and_then(|id| self.graph.get(id)) else {
            return false;
        };
        self.clipboard = Some(node.kind().clone());
        true
    }

    /// Create a node from the clipboard, emptying it.
    pub fn paste(&mut self) -> Option<NodeId> {
        let kind = self.clipboard.take()?;
        Some(self.create_node(kind))
    }

    pub fn clipboard(&self) -> Option<&NodeKind> {
        self.clipboard.as_ref()
    }

    // Preview

    /// Pin the preview to `id` regardless of selection.
    pub fn lock_preview(&mut self, id: NodeId) -> Result<()> {
        self.graph.node(id)?;
        self.preview = Some(id);
        Ok(())
    }

    pub fn unlock_preview(&mut self) {
        self.preview = None;
    }

    /// The locked preview node, else the selected node.
    pub fn preview_node(&self) -> Option<NodeId> {
        self.preview.or_else(|| self.selected_node())
    }

    /// Render the preview node at the configured preview size and upload it to `surface`.
    /// Returns `false` when there is nothing to preview.
    pub fn refresh_preview(&self, surface: &mut dyn PreviewSurface) -> Result<bool> {
        let Some(id) = self.preview_node() else {
            return Ok(false);
        };
        let size = self.config.preview_size;
        let data = self.graph.render(id, size)?;
        surface.upload(&data, size, size);
        Ok(true)
    }

    // Export

    /// Render the image output node `id` at its image size and hand the RGB buffer to
    /// `encoder` under the node's filename. Returns the path written.
    pub fn export(&self, id: NodeId, encoder: &dyn ImageEncoder) -> Result<PathBuf> {
        let NodeKind::ImageOutput(params) = self.graph.node(id)?.kind() else {
            return Err(Error::Export(format!("node {} is not an image output", id)));
        };
        if params.filename.is_empty() {
            return Err(Error::Export(format!("node {} has no filename", id)));
        }
        let size = params.image_size;
        if size == 0 || size > self.config.max_image_size {
            return Err(Error::Export(format!(
                "image size {} outside 1..={}",
                size, self.config.max_image_size
            )));
        }

        let path = PathBuf::from(&params.filename);
        let data = self.graph.render(id, size)?;
        encoder.encode(&path, &data, size, size, PixelLayout::Rgb24)?;
        info!("Exported node {} to {} ({}x{}).", id, path.display(), size, size);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;

    use super::*;
    use crate::graph::{CombineOp, Endpoint, PerlinParams, VoronoiParams};

    #[derive(Default)]
    struct RecordingEncoder {
        calls: RefCell<Vec<(PathBuf, usize, u32, PixelLayout)>>,
    }

    impl ImageEncoder for RecordingEncoder {
        fn encode(
            &self,
            path: &Path,
            data: &[u8],
            width: u32,
            height: u32,
            layout: PixelLayout,
        ) -> Result<()> {
            assert_eq!(width, height);
            self.calls
                .borrow_mut()
                .push((path.to_path_buf(), data.len(), width, layout));
            Ok(())
        }
    }

    struct FailingEncoder;

    impl ImageEncoder for FailingEncoder {
        fn encode(&self, _: &Path, _: &[u8], _: u32, _: u32, _: PixelLayout) -> Result<()> {
            Err(Error::Encode("disk full".into()))
        }
    }

    #[derive(Default)]
    struct Surface {
        uploads: Vec<(Vec<u8>, u32, u32)>,
    }

    impl PreviewSurface for Surface {
        fn upload(&mut self, data: &[u8], width: u32, height: u32) {
            self.uploads.push((data.to_vec(), width, height));
        }
    }

    fn recording() -> Workspace<VecSink> {
        Workspace::with_event_sink(WorkspaceConfig::new().with_preview_size(8), VecSink::new())
            .unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(
            Workspace::try_new(WorkspaceConfig::new().with_preview_size(0)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn mutations_emit_events() {
        let mut ws = recording();
        let c = ws.create_node(NodeKind::constant(0.5));
        let inv = ws.create_node(NodeKind::Invert);
        ws.connect(inv, 0, c, 0).unwrap();
        ws.disconnect(inv, 0).unwrap();
        // Already disconnected: no event.
        ws.disconnect(inv, 0).unwrap();
        ws.reset_node(c).unwrap();
        ws.delete_node(c).unwrap();

        let events = ws.into_event_sink().into_inner();
        assert_eq!(
            events,
            vec![
                GraphEvent::NodeCreated {
                    id: c,
                    name: "Constant".into()
                },
                GraphEvent::NodeCreated {
                    id: inv,
                    name: "Invert".into()
                },
                GraphEvent::Connected {
                    target: inv,
                    input: 0,
                    source: c,
                    output: 0
                },
                GraphEvent::Disconnected {
                    target: inv,
                    input: 0
                },
                GraphEvent::NodeReset { id: c },
                GraphEvent::NodeDeleted { id: c },
            ]
        );
    }

    #[test]
    fn delete_severs_edges_and_releases_state() {
        let mut ws = Workspace::new();
        let a = ws.create_node(NodeKind::constant(0.2));
        let f = ws.create_node(NodeKind::Abs);
        let out = ws.create_node(NodeKind::image_output(4, "out"));
        ws.connect(f, 0, a, 0).unwrap();
        ws.connect(out, 0, f, 0).unwrap();
        ws.select_output_slot(f, 0).unwrap();
        ws.lock_preview(f).unwrap();

        ws.delete_node(f).unwrap();

        assert!(ws.node(f).is_none());
        assert_eq!(ws.selection(), Selection::None);
        assert_eq!(ws.preview_node(), None);
        assert_eq!(ws.node(a).unwrap().output_count(), 1);
        assert_eq!(ws.node(out).unwrap().inputs()[0], None);
        assert!(ws.graph().is_consistent());
        assert!(ws.delete_node(f).is_err());
    }

    #[test]
    fn disconnect_output_clears_peer_input() {
        let mut ws = Workspace::new();
        let a = ws.create_node(NodeKind::constant(0.2));
        let x = ws.create_node(NodeKind::Invert);
        let y = ws.create_node(NodeKind::Invert);
        ws.connect(x, 0, a, 0).unwrap();
        ws.connect(y, 0, a, 1).unwrap();

        ws.disconnect_output(a, 0).unwrap();

        assert_eq!(ws.node(x).unwrap().inputs()[0], None);
        assert_eq!(
            ws.node(a).unwrap().outputs()[0],
            Some(Endpoint::new(y, 0))
        );
        assert!(ws.graph().is_consistent());
    }

    #[test]
    fn clone_is_independent_of_original() {
        let mut ws = Workspace::new();
        let src = ws.create_node(NodeKind::constant(0.1));
        let p = ws.create_node(NodeKind::perlin(PerlinParams::default().with_seed(5)));
        let mul = ws.create_node(NodeKind::combine(CombineOp::Multiply, 0.5));
        ws.connect(mul, 0, p, 0).unwrap();
        ws.connect(mul, 1, src, 0).unwrap();
        ws.rename_node(mul, "blend").unwrap();

        let copy = ws.clone_node(mul).unwrap();
        let node = ws.node(copy).unwrap();
        assert_ne!(copy, mul);
        assert_eq!(node.name(), "blend");
        assert_eq!(node.kind(), ws.node(mul).unwrap().kind());
        assert_eq!(node.edge_count(), 0);
        assert_eq!(node.output_count(), 1);

        ws.edit_node(copy, |kind| {
            if let NodeKind::Combine(params) = kind {
                params.op = CombineOp::Add;
            }
        })
        .unwrap();
        let NodeKind::Combine(original) = ws.node(mul).unwrap().kind() else {
            panic!("expected combine");
        };
        assert_eq!(original.op, CombineOp::Multiply);
        assert!(ws.graph().is_consistent());
    }

    #[test]
    fn edit_reseeds_generators() {
        let mut ws = Workspace::new();
        let p = ws.create_node(NodeKind::perlin(PerlinParams::default()));
        ws.edit_node(p, |kind| {
            if let NodeKind::Perlin(generator) = kind {
                generator.set_seed(11);
            }
        })
        .unwrap();

        let expected = NodeKind::perlin(PerlinParams::default().with_seed(11));
        assert_eq!(ws.node(p).unwrap().kind(), &expected);
    }

    #[test]
    fn edit_cannot_change_variant() {
        let mut ws = Workspace::new();
        let c = ws.create_node(NodeKind::constant(0.4));
        let err = ws
            .edit_node(c, |kind| *kind = NodeKind::Abs)
            .unwrap_err();
        assert!(matches!(err, Error::Other(_)));
        assert_eq!(ws.node(c).unwrap().kind(), &NodeKind::constant(0.4));
    }

    #[test]
    fn reset_node_keeps_edges() {
        let mut ws = Workspace::new();
        let v = ws.create_node(NodeKind::voronoi(VoronoiParams::default().with_seed(3)));
        let inv = ws.create_node(NodeKind::Invert);
        ws.connect(inv, 0, v, 0).unwrap();

        ws.reset_node(v).unwrap();

        assert_eq!(
            ws.node(v).unwrap().kind(),
            &NodeKind::voronoi(VoronoiParams::default())
        );
        assert_eq!(
            ws.node(inv).unwrap().inputs()[0],
            Some(Endpoint::new(v, 0))
        );
    }

    #[test]
    fn selection_validates_targets() {
        let mut ws = Workspace::new();
        let comb = ws.create_node(NodeKind::combine(CombineOp::Add, 1.0));

        ws.select_input_slot(comb, 1).unwrap();
        assert_eq!(ws.selected_node(), Some(comb));
        assert!(ws.select_input_slot(comb, 2).is_err());
        assert!(ws.select_output_slot(comb, 1).is_err());
        assert!(ws.select_node(NodeId(99)).is_err());
        // Failed selections leave the previous one in place.
        assert_eq!(ws.selection(), Selection::InputSlot { node: comb, slot: 1 });

        ws.unselect();
        assert_eq!(ws.selected_node(), None);
    }

    #[test]
    fn copy_paste_creates_unconnected_duplicate() {
        let mut ws = Workspace::new();
        assert!(!ws.copy());

        let c = ws.create_node(NodeKind::clamp(0.2, 0.8));
        ws.select_node(c).unwrap();
        assert!(ws.copy());
        assert_eq!(ws.clipboard(), Some(&NodeKind::clamp(0.2, 0.8)));

        let pasted = ws.paste().unwrap();
        assert_ne!(pasted, c);
        assert_eq!(ws.node(pasted).unwrap().kind(), &NodeKind::clamp(0.2, 0.8));
        assert!(ws.clipboard().is_none());
        assert!(ws.paste().is_none());
    }

    #[test]
    fn preview_follows_lock_then_selection() {
        let mut ws = Workspace::try_new(WorkspaceConfig::new().with_preview_size(4)).unwrap();
        let mut surface = Surface::default();
        assert!(!ws.refresh_preview(&mut surface).unwrap());

        let a = ws.create_node(NodeKind::constant(1.0));
        let b = ws.create_node(NodeKind::constant(0.0));
        ws.select_node(a).unwrap();
        ws.lock_preview(b).unwrap();
        assert_eq!(ws.preview_node(), Some(b));

        assert!(ws.refresh_preview(&mut surface).unwrap());
        let (data, w, h) = &surface.uploads[0];
        assert_eq!((*w, *h), (4, 4));
        assert!(data.iter().all(|v| *v == 0));

        ws.unlock_preview();
        assert_eq!(ws.preview_node(), Some(a));
        ws.refresh_preview(&mut surface).unwrap();
        assert!(surface.uploads[1].0.iter().all(|v| *v == 255));
    }

    #[test]
    fn preview_refresh_driven_by_drained_events() {
        let mut ws = recording();
        let a = ws.create_node(NodeKind::constant(0.25));
        let b = ws.create_node(NodeKind::constant(0.75));
        ws.lock_preview(b).unwrap();
        ws.event_sink_mut().drain();

        ws.edit_node(a, |kind| {
            if let NodeKind::Constant(p) = kind {
                p.value = 0.5;
            }
        })
        .unwrap();
        assert!(!ws.event_sink().mentions(b));

        ws.rename_node(b, "lit").unwrap();
        assert!(ws.event_sink().mentions(b));
        let frame = ws.event_sink_mut().drain();
        assert_eq!(frame.len(), 2);
        assert!(ws.event_sink().pending().is_empty());
    }

    #[test]
    fn render_and_sample_respect_max_image_size() {
        let mut ws = Workspace::try_new(
            WorkspaceConfig::new()
                .with_preview_size(64)
                .with_max_image_size(256),
        )
        .unwrap();
        let c = ws.create_node(NodeKind::constant(0.5));

        assert!(matches!(ws.render(c, 512), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            ws.sample_heightmap(c, 257),
            Err(Error::InvalidConfig(_))
        ));
        assert_eq!(ws.render(c, 256).unwrap().len(), 256 * 256 * 3);
        assert_eq!(ws.sample_heightmap(c, 256).unwrap().size(), (256, 256));
        assert!(ws.render(c, 0).unwrap().is_empty());
    }

    #[test]
    fn export_renders_image_output_at_its_size() {
        let mut ws = Workspace::new();
        let c = ws.create_node(NodeKind::constant(0.5));
        let out = ws.create_node(NodeKind::image_output(16, "field.png"));
        ws.connect(out, 0, c, 0).unwrap();

        let encoder = RecordingEncoder::default();
        let path = ws.export(out, &encoder).unwrap();

        assert_eq!(path, PathBuf::from("field.png"));
        let calls = encoder.calls.borrow();
        assert_eq!(
            calls[0],
            (PathBuf::from("field.png"), 16 * 16 * 3, 16, PixelLayout::Rgb24)
        );
    }

    #[test]
    fn export_rejects_bad_targets() {
        let mut ws = Workspace::try_new(WorkspaceConfig::new().with_max_image_size(256)).unwrap();
        let c = ws.create_node(NodeKind::constant(0.5));
        let unnamed = ws.create_node(NodeKind::image_output(16, ""));
        let huge = ws.create_node(NodeKind::image_output(1024, "big.png"));
        let empty = ws.create_node(NodeKind::image_output(0, "none.png"));
        let ok = ws.create_node(NodeKind::image_output(8, "ok.png"));
        let encoder = RecordingEncoder::default();

        for id in [c, unnamed, huge, empty] {
            assert!(matches!(ws.export(id, &encoder), Err(Error::Export(_))));
        }
        assert!(matches!(
            ws.export(ok, &FailingEncoder),
            Err(Error::Encode(_))
        ));
        assert!(encoder.calls.borrow().is_empty());
    }

    #[test]
    fn reset_clears_everything_but_keeps_counting() {
        let mut ws = recording();
        let a = ws.create_node(NodeKind::Abs);
        ws.select_node(a).unwrap();
        ws.copy();
        ws.lock_preview(a).unwrap();

        ws.reset();

        assert_eq!(ws.nodes().count(), 0);
        assert_eq!(ws.selection(), Selection::None);
        assert!(ws.clipboard().is_none());
        assert_eq!(ws.preview_node(), None);
        assert_eq!(ws.event_sink().pending().last(), Some(&GraphEvent::Cleared));

        let b = ws.create_node(NodeKind::Abs);
        assert!(b > a);
    }

    #[test]
    fn invariants_hold_across_mixed_edits() {
        let mut ws = Workspace::new();
        let p = ws.create_node(NodeKind::perlin(PerlinParams::default()));
        let v = ws.create_node(NodeKind::voronoi(VoronoiParams::default()));
        let add = ws.create_node(NodeKind::combine(CombineOp::Add, 1.0));
        let sel = ws.create_node(NodeKind::selector(0.3, 0.7, 0.5));
        let out = ws.create_node(NodeKind::image_output(8, "x.png"));

        ws.connect(add, 0, p, 0).unwrap();
        ws.connect(add, 1, v, 0).unwrap();
        ws.connect(sel, 0, add, 0).unwrap();
        ws.connect(out, 0, sel, 0).unwrap();
        assert!(ws.graph().is_consistent());

        let copy = ws.clone_node(add).unwrap();
        ws.connect(copy, 0, p, 1).unwrap();
        ws.connect(copy, 1, v, 1).unwrap();
        ws.connect(sel, 0, copy, 0).unwrap();
        assert!(ws.graph().is_consistent());
        assert_eq!(ws.node(add).unwrap().output_count(), 1);

        ws.delete_node(p).unwrap();
        assert!(ws.graph().is_consistent());
        assert_eq!(ws.node(add).unwrap().inputs()[0], None);
        assert_eq!(ws.node(copy).unwrap().inputs()[0], None);

        let value = ws.evaluate(out, 0.25, 0.75, 0.0).unwrap();
        assert!((0.0..=1.0).contains(&value));
    }
}
