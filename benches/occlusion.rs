use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ssao_renderer::prelude::*;

fn rendered_engine() -> (Engine, Mesh) {
    let mut engine = Engine::new(RenderConfig::default()).unwrap();
    engine.set_display_mode(DisplayMode::Flat);
    let mesh = Mesh::checker_quad(300.0).unwrap();
    engine.render_at(&mesh, engine.view());
    (engine, mesh)
}

fn benchmark_occlusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("occlusion");
    let (engine, _) = rendered_engine();
    let mut ao = AmbientOcclusion::new(engine.width(), engine.height(), engine.config().ao);

    group.bench_function("process_800x600", |b| {
        b.iter(|| ao.process(black_box(engine.depth_buffer())));
    });

    group.bench_function("blur_800x600", |b| {
        b.iter(|| {
            black_box(ao.blur());
        });
    });

    group.finish();
}

fn benchmark_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    let (mut engine, mesh) = rendered_engine();

    for mode in [
        DisplayMode::Flat,
        DisplayMode::OcclusionOnly,
        DisplayMode::FlatWithOcclusion,
    ] {
        engine.set_display_mode(mode);
        group.bench_function(mode.to_string(), |b| {
            b.iter(|| engine.render(black_box(&mesh)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_occlusion, benchmark_frame);
criterion_main!(benches);
