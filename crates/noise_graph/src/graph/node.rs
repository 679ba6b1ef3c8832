//! Node data model for the graph engine.
//!
//! This module defines the node variant catalog ([`NodeKind`]) with its parameter types, and
//! the [`Node`] record holding identity and slot arrays. Connectivity is mutated through
//! [`crate::graph::Graph`] so both endpoints of an edge always change together.
use std::fmt;

use glam::Vec2;
use mint::Vector2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, SlotDirection};
use crate::noise::{DistanceMetric, PerlinNoise, VoronoiNoise};

/// Identity of a node within its graph. Allocated monotonically and never reused.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The far end of an edge: a peer node and one of its slot indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub node: NodeId,
    pub slot: usize,
}

impl Endpoint {
    pub fn new(node: NodeId, slot: usize) -> Self {
        Self { node, slot }
    }
}

/// A slot either references a peer endpoint or is unconnected.
pub type Slot = Option<Endpoint>;

/// Output-shaping function applied to normalized Perlin values.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PerlinShape {
    #[default]
    Classic,
    /// Folds values below the midline upward.
    Billowy,
    /// Folds values toward sharp ridges at the midline.
    Ridged,
}

impl PerlinShape {
    #[inline]
    pub fn apply(self, v: f32) -> f32 {
        match self {
            PerlinShape::Classic => v,
            PerlinShape::Billowy => (v - 0.5).abs() + 0.5,
            PerlinShape::Ridged => 0.5 - (v - 0.5).abs(),
        }
    }
}

/// Binary operator of a combine node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CombineOp {
    #[default]
    Add,
    Multiply,
}

impl CombineOp {
    #[inline]
    pub fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            CombineOp::Add => a + b,
            CombineOp::Multiply => a * b,
        }
    }
}

/// Parameters for a Perlin generator node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PerlinParams {
    pub seed: u64,
    /// Number of summed noise layers.
    pub octaves: u32,
    /// Base frequency of the first octave.
    pub frequency: f32,
    /// Amplitude factor between octaves.
    pub persistence: f32,
    /// Frequency factor between octaves.
    pub lacunarity: f32,
    pub shape: PerlinShape,
}

impl Default for PerlinParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 3,
            frequency: 1.0,
            persistence: 0.5,
            lacunarity: 2.0,
            shape: PerlinShape::Classic,
        }
    }
}

impl PerlinParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_persistence(mut self, persistence: f32) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f32) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn with_shape(mut self, shape: PerlinShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Parameters for a Voronoi generator node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiParams {
    pub seed: u64,
    pub frequency: f32,
    pub metric: DistanceMetric,
}

impl Default for VoronoiParams {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 1.0,
            metric: DistanceMetric::Euclidean,
        }
    }
}

impl VoronoiParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }
}

/// Parameters for a constant value node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstantParams {
    /// The constant value.
    pub value: f32,
}

/// Parameters for a gradient node.
///
/// The endpoints are stored and editable, but the gradient evaluator does not consult
/// them yet and always yields [`GRADIENT_VALUE`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct GradientParams {
    pub start: Vec2,
    pub end: Vec2,
}

/// Value produced by every gradient node.
pub const GRADIENT_VALUE: f32 = 0.0;

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            start: Vec2::ZERO,
            end: Vec2::ONE,
        }
    }
}

/// Parameters for a clamp node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ClampParams {
    /// Minimum value to clamp to.
    pub min: f32,
    /// Maximum value to clamp to.
    pub max: f32,
}

impl Default for ClampParams {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl ClampParams {
    /// Clamp without panicking on inverted bounds; `max` wins when `min > max`.
    #[inline]
    pub fn apply(&self, v: f32) -> f32 {
        v.max(self.min).min(self.max)
    }
}

/// Parameters for a band-pass selector node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorParams {
    /// Lower edge of the selected band.
    pub min: f32,
    /// Upper edge of the selected band.
    pub max: f32,
    /// Edge hardness in `[0, 1]`; `1.0` gives hard edges.
    pub falloff: f32,
}

impl Default for SelectorParams {
    fn default() -> Self {
        Self {
            min: 0.25,
            max: 0.75,
            falloff: 0.5,
        }
    }
}

impl SelectorParams {
    /// `1.0` inside `[min, max]`, fading linearly to `0.0` over `(max - min) * (1 - falloff)`
    /// outside the band.
    pub fn apply(&self, v: f32) -> f32 {
        if v >= self.min && v <= self.max {
            return 1.0;
        }
        let width = (self.max - self.min) * (1.0 - self.falloff);
        if width <= 0.0 {
            return 0.0;
        }
        let dist = if v < self.min {
            self.min - v
        } else {
            v - self.max
        };
        (1.0 - dist / width).max(0.0)
    }
}

/// Parameters for a two-input combine node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CombineParams {
    pub op: CombineOp,
    /// Multiplier applied to the second input.
    pub strength: f32,
}

impl Default for CombineParams {
    fn default() -> Self {
        Self {
            op: CombineOp::Add,
            strength: 1.0,
        }
    }
}

impl CombineParams {
    /// `clamp01(op(a, b * strength))`.
    #[inline]
    pub fn apply(&self, a: f32, b: f32) -> f32 {
        self.op.apply(a, b * self.strength).clamp(0.0, 1.0)
    }
}

/// Parameters for an image output sink.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOutputParams {
    /// Edge length of the exported square image in pixels.
    pub image_size: u32,
    /// Target file name handed to the image encoder.
    pub filename: String,
}

impl Default for ImageOutputParams {
    fn default() -> Self {
        Self {
            image_size: 512,
            filename: String::new(),
        }
    }
}

/// Perlin generator: parameters plus the kernel seeded from them.
#[derive(Clone, Debug, PartialEq)]
pub struct PerlinGenerator {
    params: PerlinParams,
    noise: PerlinNoise,
}

impl PerlinGenerator {
    pub fn new(params: PerlinParams) -> Self {
        let noise = PerlinNoise::new(params.seed);
        Self { params, noise }
    }

    pub fn params(&self) -> &PerlinParams {
        &self.params
    }

    /// Replace the parameters, reseeding the kernel when the seed changed.
    pub fn set_params(&mut self, params: PerlinParams) {
        if params.seed != self.params.seed {
            self.noise.reseed(params.seed);
        }
        self.params = params;
    }

    pub fn set_seed(&mut self, seed: u64) {
        let params = self.params.clone().with_seed(seed);
        self.set_params(params);
    }

    /// Shaped fractal sum in `[0, 1]`.
    pub fn evaluate(&self, x: f32, y: f32, z: f32) -> f32 {
        let p = &self.params;
        let v = self.noise.sample_fractal(
            x,
            y,
            z,
            p.octaves,
            p.frequency,
            p.persistence,
            p.lacunarity,
        );
        p.shape.apply((v + 1.0) * 0.5)
    }
}

impl Default for PerlinGenerator {
    fn default() -> Self {
        Self::new(PerlinParams::default())
    }
}

/// Voronoi generator: parameters plus the kernel seeded from them.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiGenerator {
    params: VoronoiParams,
    noise: VoronoiNoise,
}

impl VoronoiGenerator {
    pub fn new(params: VoronoiParams) -> Self {
        let noise = VoronoiNoise::new(params.seed).with_metric(params.metric);
        Self { params, noise }
    }

    pub fn params(&self) -> &VoronoiParams {
        &self.params
    }

    /// Replace the parameters, reseeding the kernel when the seed changed.
    pub fn set_params(&mut self, params: VoronoiParams) {
        if params.seed != self.params.seed {
            self.noise.reseed(params.seed);
        }
        self.noise.metric = params.metric;
        self.params = params;
    }

    pub fn set_seed(&mut self, seed: u64) {
        let params = self.params.clone().with_seed(seed);
        self.set_params(params);
    }

    pub fn evaluate(&self, x: f32, y: f32, z: f32) -> f32 {
        self.noise.sample_scaled(x, y, z, self.params.frequency)
    }
}

impl Default for VoronoiGenerator {
    fn default() -> Self {
        Self::new(VoronoiParams::default())
    }
}

/// Broad role of a node variant, mirrored in its slot layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// No inputs, open outputs.
    Generator,
    /// One input, open outputs.
    Filter,
    /// Two inputs, open outputs.
    Combiner,
    /// One input, no outputs.
    Output,
}

/// The closed catalog of node variants.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Perlin(PerlinGenerator),
    Voronoi(VoronoiGenerator),
    Constant(ConstantParams),
    Gradient(GradientParams),
    /// Folds values around `0.5`: `|v - 0.5| + 0.5`.
    Abs,
    /// `1 - v`.
    Invert,
    Clamp(ClampParams),
    Selector(SelectorParams),
    Combine(CombineParams),
    ImageOutput(ImageOutputParams),
}

impl NodeKind {
    pub fn perlin(params: PerlinParams) -> Self {
        NodeKind::Perlin(PerlinGenerator::new(params))
    }

    pub fn voronoi(params: VoronoiParams) -> Self {
        NodeKind::Voronoi(VoronoiGenerator::new(params))
    }

    pub fn constant(value: f32) -> Self {
        NodeKind::Constant(ConstantParams { value })
    }

    pub fn gradient(start: impl Into<Vector2<f32>>, end: impl Into<Vector2<f32>>) -> Self {
        NodeKind::Gradient(GradientParams {
            start: Vec2::from(start.into()),
            end: Vec2::from(end.into()),
        })
    }

    pub fn clamp(min: f32, max: f32) -> Self {
        NodeKind::Clamp(ClampParams { min, max })
    }

    pub fn selector(min: f32, max: f32, falloff: f32) -> Self {
        NodeKind::Selector(SelectorParams { min, max, falloff })
    }

    pub fn combine(op: CombineOp, strength: f32) -> Self {
        NodeKind::Combine(CombineParams { op, strength })
    }

    pub fn image_output(image_size: u32, filename: impl Into<String>) -> Self {
        NodeKind::ImageOutput(ImageOutputParams {
            image_size,
            filename: filename.into(),
        })
    }

    /// Default display name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Perlin(_) => "Perlin",
            NodeKind::Voronoi(_) => "Voronoi",
            NodeKind::Constant(_) => "Constant",
            NodeKind::Gradient(_) => "Gradient",
            NodeKind::Abs => "Abs",
            NodeKind::Invert => "Invert",
            NodeKind::Clamp(_) => "Clamp",
            NodeKind::Selector(_) => "Selector",
            NodeKind::Combine(_) => "Combine",
            NodeKind::ImageOutput(_) => "Image Output",
        }
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            NodeKind::Perlin(_)
            | NodeKind::Voronoi(_)
            | NodeKind::Constant(_)
            | NodeKind::Gradient(_) => NodeCategory::Generator,
            NodeKind::Abs | NodeKind::Invert | NodeKind::Clamp(_) | NodeKind::Selector(_) => {
                NodeCategory::Filter
            }
            NodeKind::Combine(_) => NodeCategory::Combiner,
            NodeKind::ImageOutput(_) => NodeCategory::Output,
        }
    }

    /// Fixed number of input slots.
    pub fn input_count(&self) -> usize {
        match self.category() {
            NodeCategory::Generator => 0,
            NodeCategory::Filter | NodeCategory::Output => 1,
            NodeCategory::Combiner => 2,
        }
    }

    /// Whether the variant exposes open output slots.
    pub fn has_outputs(&self) -> bool {
        self.category() != NodeCategory::Output
    }

    /// Restore the variant's default parameters.
    pub fn reset(&mut self) {
        *self = match self {
            NodeKind::Perlin(_) => NodeKind::Perlin(PerlinGenerator::default()),
            NodeKind::Voronoi(_) => NodeKind::Voronoi(VoronoiGenerator::default()),
            NodeKind::Constant(_) => NodeKind::Constant(ConstantParams::default()),
            NodeKind::Gradient(_) => NodeKind::Gradient(GradientParams::default()),
            NodeKind::Abs => NodeKind::Abs,
            NodeKind::Invert => NodeKind::Invert,
            NodeKind::Clamp(_) => NodeKind::Clamp(ClampParams::default()),
            NodeKind::Selector(_) => NodeKind::Selector(SelectorParams::default()),
            NodeKind::Combine(_) => NodeKind::Combine(CombineParams::default()),
            NodeKind::ImageOutput(_) => NodeKind::ImageOutput(ImageOutputParams::default()),
        };
    }
}

/// A node in the graph: identity, variant, and slot arrays.
///
/// Inputs are a fixed, dense array sized by the variant. Outputs keep exactly one trailing
/// free slot for nodes that have outputs; sinks have none.
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    name: String,
    kind: NodeKind,
    pub(crate) inputs: Vec<Slot>,
    pub(crate) outputs: Vec<Slot>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        let outputs = if kind.has_outputs() {
            vec![None]
        } else {
            Vec::new()
        };
        Self {
            id,
            name: kind.name().to_string(),
            inputs: vec![None; kind.input_count()],
            outputs,
            kind,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of output slots: connected edges plus the trailing free slot.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn inputs(&self) -> &[Slot] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Slot] {
        &self.outputs
    }

    pub fn input_slot(&self, slot: usize) -> Result<Slot> {
        self.inputs
            .get(slot)
            .copied()
            .ok_or_else(|| self.slot_error(SlotDirection::Input, slot))
    }

    pub fn output_slot(&self, slot: usize) -> Result<Slot> {
        self.outputs
            .get(slot)
            .copied()
            .ok_or_else(|| self.slot_error(SlotDirection::Output, slot))
    }

    pub fn is_input_connected(&self, slot: usize) -> Result<bool> {
        Ok(self.input_slot(slot)?.is_some())
    }

    pub fn is_output_connected(&self, slot: usize) -> Result<bool> {
        Ok(self.output_slot(slot)?.is_some())
    }

    /// Index of the trailing free output slot, if the node has outputs.
    pub fn free_output_slot(&self) -> Option<usize> {
        self.outputs.len().checked_sub(1)
    }

    /// Number of live edges on either side of the node.
    pub fn edge_count(&self) -> usize {
        self.inputs.iter().flatten().count() + self.outputs.iter().flatten().count()
    }

    pub(crate) fn slot_error(&self, direction: SlotDirection, slot: usize) -> Error {
        let count = match direction {
            SlotDirection::Input => self.inputs.len(),
            SlotDirection::Output => self.outputs.len(),
        };
        Error::SlotIndex {
            node: self.id,
            direction,
            slot,
            count,
        }
    }
}
