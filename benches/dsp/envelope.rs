//! Benchmarks for ADSR envelopes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ozsynth::dsp::envelope::{AdsrParams, Envelope};
use ozsynth::{apply_adsr, SampleRate};

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BUFFER_SIZES {
        let input = vec![0.5f32; size];

        // all four regions present
        group.bench_with_input(BenchmarkId::new("apply_adsr", size), &size, |b, _| {
            b.iter(|| {
                apply_adsr(
                    black_box(&input),
                    SAMPLE_RATE,
                    black_box(0.001),
                    black_box(0.002),
                    black_box(0.7),
                    black_box(0.001),
                )
            })
        });

        // gated generator held in sustain
        let rate = SampleRate::new(SAMPLE_RATE).unwrap();
        let mut env = Envelope::new(AdsrParams::new(0.001, 0.001, 0.7, 0.3), rate);
        env.note_on();
        for _ in 0..200 {
            env.next_sample();
        }
        let mut buffer = vec![0.0f32; size];
        group.bench_with_input(BenchmarkId::new("stream_sustain", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
