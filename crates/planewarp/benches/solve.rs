use criterion::{black_box, criterion_group, criterion_main, Criterion};
use planewarp::presets::{default_points, sample_grid, GridSpec};
use planewarp::{solve, Point, TransformKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn jittered(kind: TransformKind, rng: &mut StdRng) -> Vec<Point> {
    default_points(kind)
        .into_iter()
        .map(|p| Point::new(p.x + rng.gen_range(-30.0..30.0), p.y + rng.gen_range(-30.0..30.0)))
        .collect()
}

fn bench_solve(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for kind in TransformKind::ALL {
        let src = default_points(kind);
        let dst = jittered(kind, &mut rng);
        c.bench_function(&format!("solve_{kind}"), |b| {
            b.iter(|| solve(black_box(kind), black_box(&src), black_box(&dst)))
        });
    }
}

fn bench_remap_grid(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let kind = TransformKind::Perspective;
    let src = default_points(kind);
    let dst = jittered(kind, &mut rng);
    let Ok(t) = solve(kind, &src, &dst) else {
        return;
    };
    let grid = sample_grid(&GridSpec::default());
    c.bench_function("remap_default_grid", |b| {
        b.iter(|| t.apply_all(black_box(&grid)))
    });
}

criterion_group!(benches, bench_solve, bench_remap_grid);
criterion_main!(benches);
