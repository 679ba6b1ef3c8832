use noise_graph::prelude::*;
use noise_graph_examples::{init_tracing, PngEncoder};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut ws = Workspace::new();

    let shapes = [
        ("classic", PerlinShape::Classic),
        ("billowy", PerlinShape::Billowy),
        ("ridged", PerlinShape::Ridged),
    ];

    let mut classic = None;
    for (name, shape) in shapes {
        let noise = ws.create_node(NodeKind::perlin(
            PerlinParams::default()
                .with_seed(7)
                .with_octaves(5)
                .with_frequency(4.0)
                .with_shape(shape),
        ));
        classic.get_or_insert(noise);

        let out = ws.create_node(NodeKind::image_output(
            256,
            format!("noise-perlin-{name}.png"),
        ));
        ws.connect(out, 0, noise, 0)?;
        let path = ws.export(out, &PngEncoder)?;
        println!("wrote {}", path.display());
    }

    // Band-select the mid range of the classic field for a contour-like mask.
    if let Some(classic) = classic {
        let band = ws.create_node(NodeKind::selector(0.45, 0.55, 0.5));
        let out = ws.create_node(NodeKind::image_output(256, "noise-perlin-band.png"));
        let free = ws
            .node(classic)
            .and_then(Node::free_output_slot)
            .unwrap_or_default();
        ws.connect(band, 0, classic, free)?;
        ws.connect(out, 0, band, 0)?;
        let path = ws.export(out, &PngEncoder)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
