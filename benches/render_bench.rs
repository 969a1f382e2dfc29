use criterion::{criterion_group, criterion_main, Criterion};

use iconforge::codec::png;
use iconforge::render::scene;
use iconforge::IconConfig;

// Benchmarks exercise the render and encode paths at a reduced size.
fn bench_render(c: &mut Criterion) {
    let config = IconConfig {
        size: 256,
        ..Default::default()
    };
    c.bench_function("render_256", |b| b.iter(|| scene::render(&config)));
}

fn bench_encode_png(c: &mut Criterion) {
    let config = IconConfig {
        size: 256,
        ..Default::default()
    };
    let canvas = scene::render(&config);
    c.bench_function("encode_png_256", |b| {
        b.iter(|| png::encode(canvas.width(), canvas.height(), canvas.pixels()).unwrap())
    });
}

criterion_group!(benches, bench_render, bench_encode_png);
criterion_main!(benches);
