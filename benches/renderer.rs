use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use diagram_eps_renderer::{
    Color, Config, Diagram, DiagramShape, DiagramText, Path, ShapeKind, render_eps,
};
use std::hint::black_box;

fn box_path(x: f64, y: f64, w: f64, h: f64) -> Path {
    Path::new()
        .move_to(x, y)
        .line_to(x + w, y)
        .line_to(x + w, y + h)
        .line_to(x, y + h)
        .close()
}

fn storage_path(x: f64, y: f64, w: f64, h: f64) -> Path {
    let lip = h / 6.0;
    Path::new()
        .move_to(x, y + lip)
        .quad_to(x + w / 2.0, y - lip, x + w, y + lip)
        .line_to(x + w, y + h - lip)
        .quad_to(x + w / 2.0, y + h + lip, x, y + h - lip)
        .close()
}

/// A grid of boxes joined by arrows, with every fifth node a storage shape.
fn grid_diagram(side: usize) -> Diagram {
    let cell = 10u32;
    let pitch = 80.0;
    let extent = side as f64 * pitch + pitch;
    let mut diagram = Diagram::new(extent, extent, cell, cell + 4);
    for row in 0..side {
        for col in 0..side {
            let x = col as f64 * pitch + 20.0;
            let y = row as f64 * pitch + 20.0;
            let index = row * side + col;
            let shape = if index % 5 == 0 {
                DiagramShape::new(ShapeKind::Storage, storage_path(x, y, 40.0, 40.0))
            } else {
                DiagramShape::new(ShapeKind::Ordinary, box_path(x, y, 40.0, 40.0))
                    .drops_shadow(true)
            };
            diagram.shapes.push(shape.closed(true).fill(Color::rgb(255, 255, 204)));
            if col + 1 < side {
                diagram.shapes.push(
                    DiagramShape::new(
                        ShapeKind::Ordinary,
                        Path::new().move_to(x + 40.0, y + 20.0).line_to(x + pitch, y + 20.0),
                    )
                    .dashed(index % 3 == 0),
                );
                diagram.shapes.push(
                    DiagramShape::new(
                        ShapeKind::Arrowhead,
                        Path::new()
                            .move_to(x + pitch, y + 20.0)
                            .line_to(x + pitch - 6.0, y + 17.0)
                            .line_to(x + pitch - 6.0, y + 23.0)
                            .close(),
                    )
                    .closed(true)
                    .fill(Color::BLACK),
                );
            }
            diagram.texts.push(DiagramText {
                text: format!("n{index}"),
                x: x + 8.0,
                y: y + 24.0,
                color: Color::BLACK,
                font_size: 12,
            });
        }
    }
    diagram
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_eps");
    let config = Config::default();
    for side in [4usize, 16, 48] {
        let diagram = grid_diagram(side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &diagram, |b, data| {
            b.iter(|| {
                let out = render_eps(black_box(data), &config, Vec::with_capacity(64 * 1024))
                    .expect("render failed");
                black_box(out);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
