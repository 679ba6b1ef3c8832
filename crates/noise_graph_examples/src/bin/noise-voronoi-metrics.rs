use std::path::Path;

use noise_graph::prelude::*;
use noise_graph_examples::{init_tracing, PngEncoder};

const SIZE: u32 = 256;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut ws = Workspace::new();

    // Raw cell distances are unbounded, so each metric is normalized before writing.
    for metric in DistanceMetric::ALL {
        let name = format!("{metric:?}").to_lowercase();
        let node = ws.create_node(NodeKind::voronoi(
            VoronoiParams::default()
                .with_seed(11)
                .with_frequency(8.0)
                .with_metric(metric),
        ));
        ws.rename_node(node, format!("voronoi-{name}"))?;

        let mut map = ws.sample_heightmap(node, SIZE)?;
        map.normalize().invert();

        let path = format!("noise-voronoi-{name}.png");
        PngEncoder.encode(
            Path::new(&path),
            &map.to_bytes(PixelLayout::Gray16),
            SIZE,
            SIZE,
            PixelLayout::Gray16,
        )?;
        println!("wrote {path}");
    }

    Ok(())
}
