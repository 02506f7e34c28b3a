//! Benchmarks for target mesh generation and crease detection

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rcsim_mesh::{build_mesh, detect_edges, shapes::geodesic_sphere, CreaseParams, TargetShape};

fn bench_geodesic_subdivision(c: &mut Criterion) {
    let mut group = c.benchmark_group("geodesic_sphere");

    for level in [1, 3, 5].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(level), level, |b, &level| {
            b.iter(|| black_box(geodesic_sphere(black_box(level))));
        });
    }

    group.finish();
}

fn bench_detect_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_edges");
    let params = CreaseParams::default();

    for shape in TargetShape::ALL {
        let mesh = build_mesh(shape, 4);
        group.bench_with_input(BenchmarkId::from_parameter(shape), &mesh, |b, mesh| {
            b.iter(|| black_box(detect_edges(black_box(mesh), &params)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_geodesic_subdivision, bench_detect_edges);
criterion_main!(benches);
