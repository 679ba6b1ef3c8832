//! Node graph engine: node catalog, arena with symmetric edge bookkeeping, pull-based
//! evaluation and grid rendering.
pub mod arena;
pub mod eval;
pub mod node;
pub mod raster;

pub use arena::Graph;
pub use node::{
    ClampParams, CombineOp, CombineParams, ConstantParams, Endpoint, GradientParams,
    ImageOutputParams, Node, NodeCategory, NodeId, NodeKind, PerlinGenerator, PerlinParams,
    PerlinShape, SelectorParams, Slot, VoronoiGenerator, VoronoiParams, GRADIENT_VALUE,
};
pub use raster::Heightmap;
