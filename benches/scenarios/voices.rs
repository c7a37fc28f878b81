//! Benchmarks for complete note chains.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ozsynth::synth::{ModulationMode, Synthesizer};
use ozsynth::{
    apply_adsr, apply_am, apply_fm, generate_sine_wave, note_to_frequency, SynthConfig,
};

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let frequency = note_to_frequency(45); // A2, typical bass note

    for &size in BUFFER_SIZES {
        let duration = size as f32 / SAMPLE_RATE as f32;

        // === TREMOLO NOTE ===
        // sine → AM with slow sine → ADSR
        group.bench_with_input(BenchmarkId::new("am_chain", size), &size, |b, _| {
            b.iter(|| {
                let carrier = generate_sine_wave(frequency, duration, SAMPLE_RATE).unwrap();
                let lfo = generate_sine_wave(6.0, duration, SAMPLE_RATE).unwrap();
                let voiced = apply_am(&carrier, &lfo, black_box(0.4));
                apply_adsr(&voiced, SAMPLE_RATE, 0.005, 0.05, 0.7, 0.005)
            })
        });

        // === FM BELL ===
        // audio-rate sine modulator → FM → ADSR
        group.bench_with_input(BenchmarkId::new("fm_chain", size), &size, |b, _| {
            b.iter(|| {
                let modulator = generate_sine_wave(frequency * 1.4, duration, SAMPLE_RATE).unwrap();
                let voiced = apply_fm(frequency, &modulator, black_box(300.0), SAMPLE_RATE).unwrap();
                apply_adsr(&voiced, SAMPLE_RATE, 0.001, 0.2, 0.3, 0.005)
            })
        });

        // === STREAMING VOICE ===
        // same FM patch rendered sample-by-sample into a reused buffer
        let config = SynthConfig::with_sample_rate(SAMPLE_RATE).unwrap();
        let mut synth = Synthesizer::new(config).unwrap();
        synth.set_modulation(ModulationMode::Fm, frequency * 1.4, 300.0);
        synth.note_on(45);
        let mut buffer = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("fm_stream", size), &size, |b, _| {
            b.iter(|| synth.render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
