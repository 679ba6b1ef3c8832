use noise_graph::prelude::*;
use noise_graph_examples::{init_tracing, BufferSurface, PngEncoder};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = WorkspaceConfig::new().with_preview_size(128);
    let sink = FnSink::new(|event: GraphEvent| info!("{event:?}"));
    let mut ws = Workspace::with_event_sink(config, sink)?;

    // Two Perlin layers: a detailed one and a broad one lifted by a constant.
    let detail = ws.create_node(NodeKind::perlin(
        PerlinParams::default()
            .with_octaves(3)
            .with_frequency(3.0)
            .with_seed(2),
    ));
    let broad = ws.create_node(NodeKind::perlin(
        PerlinParams::default().with_octaves(1).with_frequency(2.0),
    ));
    let lift = ws.create_node(NodeKind::constant(0.0));
    let add = ws.create_node(NodeKind::combine(CombineOp::Add, 1.0));
    let mul = ws.create_node(NodeKind::combine(CombineOp::Multiply, 1.0));
    let out = ws.create_node(NodeKind::image_output(512, "graph-perlin-combine.png"));

    ws.connect(add, 0, broad, 0)?;
    ws.connect(add, 1, lift, 0)?;
    ws.connect(mul, 0, detail, 0)?;
    ws.connect(mul, 1, add, 0)?;
    ws.connect(out, 0, mul, 0)?;

    let center = ws.evaluate(mul, 0.5, 0.5, 0.0)?;
    println!("value at (0.5, 0.5, 0): {center:.6}");

    let path = ws.export(out, &PngEncoder)?;
    println!("wrote {}", path.display());

    // Preview the broad layer alone while the output stays wired.
    ws.select_node(broad)?;
    let mut surface = BufferSurface::new();
    if ws.refresh_preview(&mut surface)? {
        surface.save_png("graph-perlin-combine-preview.png")?;
        println!("wrote graph-perlin-combine-preview.png");
    }

    Ok(())
}
