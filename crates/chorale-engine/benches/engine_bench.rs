//! Throughput benchmarks for the chorus hot path.

use chorale_core::Effect;
use chorale_engine::DimensionChorus;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const SR: f32 = 48000.0;
const BLOCK: usize = 512;

fn bench_process_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_block");
    group.throughput(criterion::Throughput::Elements(BLOCK as u64));

    let input: Vec<f32> = (0..BLOCK).map(|n| ((n as f32) * 0.02).sin()).collect();
    let mut output = vec![0.0f32; BLOCK];

    for mode in [0u8, 1, 4] {
        let mut chorus = DimensionChorus::new(SR);
        chorus.toggle_mode(1).unwrap();
        if mode != 0 {
            chorus.toggle_mode(mode).unwrap();
        }

        group.bench_function(format!("mode_{mode}"), |b| {
            b.iter(|| {
                chorus.process_block(black_box(&input), &mut output);
                black_box(&output);
            });
        });
    }

    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let mut chorus = DimensionChorus::new(SR);
    let mut id = 1u8;

    c.bench_function("toggle_mode", |b| {
        b.iter(|| {
            id = id % 4 + 1;
            chorus.toggle_mode(black_box(id)).unwrap();
        });
    });
}

criterion_group!(benches, bench_process_block, bench_toggle);
criterion_main!(benches);
