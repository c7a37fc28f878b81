//! Benchmarks for gain and level helpers.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ozsynth::dsp::amplify;

use crate::BUFFER_SIZES;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &size in BUFFER_SIZES {
        let signal: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let envelope: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();
        let mut output = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("multiply", size), &size, |b, _| {
            b.iter(|| {
                amplify::multiply(
                    black_box(&signal),
                    black_box(&envelope),
                    black_box(&mut output),
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("rms", size), &size, |b, _| {
            b.iter(|| amplify::rms(black_box(&signal)))
        });
    }

    group.finish();
}
