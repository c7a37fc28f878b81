//! Benchmarks for waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ozsynth::dsp::oscillator::{generate_wave, Oscillator, Waveform};
use ozsynth::{generate_sine_wave, SampleRate};

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BUFFER_SIZES {
        let duration = size as f32 / SAMPLE_RATE as f32;

        group.bench_with_input(BenchmarkId::new("sine_buffer", size), &size, |b, _| {
            b.iter(|| generate_sine_wave(black_box(440.0), black_box(duration), SAMPLE_RATE))
        });

        group.bench_with_input(BenchmarkId::new("triangle_buffer", size), &size, |b, _| {
            b.iter(|| {
                generate_wave(
                    Waveform::Triangle,
                    black_box(440.0),
                    black_box(duration),
                    SAMPLE_RATE,
                )
            })
        });

        // streaming form writes into a reused buffer
        let rate = SampleRate::new(SAMPLE_RATE).unwrap();
        let mut osc = Oscillator::new(Waveform::Sine, 440.0, rate);
        let mut buffer = vec![0.0f32; size];
        group.bench_with_input(BenchmarkId::new("sine_stream", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
