#![forbid(unsafe_code)]
//! noise_graph: Procedural noise node graphs with pull-based evaluation.
//!
//! Modules:
//! - noise: seeded Perlin and Voronoi kernels
//! - graph: node catalog, connectivity arena, evaluation and grid rendering
//! - workspace: editing session with selection, clipboard, preview and export
//! - export: pixel layouts and the image encoder / preview surface collaborators
pub mod error;
pub mod export;
pub mod graph;
pub mod noise;
pub mod workspace;

/// Convenient re-exports for common types. Import with `use noise_graph::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result, SlotDirection};
    pub use crate::export::{ImageEncoder, PixelLayout, PreviewSurface};
    pub use crate::graph::{
        ClampParams, CombineOp, CombineParams, ConstantParams, Endpoint, GradientParams, Graph,
        Heightmap, ImageOutputParams, Node, NodeCategory, NodeId, NodeKind, PerlinParams,
        PerlinShape, SelectorParams, Slot, VoronoiParams,
    };
    pub use crate::noise::{DistanceMetric, Noise3D, PerlinNoise, VoronoiNoise};
    pub use crate::workspace::{
        EventSink, FnSink, GraphEvent, Selection, VecSink, Workspace, WorkspaceConfig,
    };
}
