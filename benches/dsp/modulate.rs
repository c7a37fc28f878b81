//! Benchmarks for amplitude and frequency modulation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ozsynth::{apply_am, apply_fm, generate_sine_wave};

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_modulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/modulate");

    for &size in BUFFER_SIZES {
        let duration = size as f32 / SAMPLE_RATE as f32;
        let carrier = generate_sine_wave(440.0, duration, SAMPLE_RATE).unwrap();
        let modulator = generate_sine_wave(110.0, duration, SAMPLE_RATE).unwrap();

        group.bench_with_input(BenchmarkId::new("am", size), &size, |b, _| {
            b.iter(|| apply_am(black_box(&carrier), black_box(&modulator), black_box(0.5)))
        });

        // sequential phase accumulation
        group.bench_with_input(BenchmarkId::new("fm", size), &size, |b, _| {
            b.iter(|| {
                apply_fm(
                    black_box(440.0),
                    black_box(&modulator),
                    black_box(200.0),
                    SAMPLE_RATE,
                )
            })
        });
    }

    group.finish();
}
