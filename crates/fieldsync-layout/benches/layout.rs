//! Benchmarks for staged placement.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fieldsync_core::{ComponentId, IdGenerator, Rect, SequentialIds};
use fieldsync_layout::{PlacementBatch, PlacementEngine, Spread};

fn bench_layout(c: &mut Criterion) {
    let engine = PlacementEngine::new();
    let region = Rect::new(0.0, 0.0, 200.0, 1080.0);
    let mut seed = SequentialIds::starting_at(1_000_000);
    let existing: Vec<ComponentId> = (0..200).map(|_| seed.new_id()).collect();
    let batches = vec![PlacementBatch::new("phone", 50), PlacementBatch::new("laptop", 50)];

    c.bench_function("layout_column_300", |b| {
        b.iter(|| {
            let mut ids = SequentialIds::new();
            engine.layout(
                black_box(region),
                Spread::Column,
                black_box(&existing),
                black_box(&batches),
                &mut ids,
            )
        });
    });
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
