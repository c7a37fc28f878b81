use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::{SampleRate, SynthConfig},
    dsp::{
        envelope::Envelope,
        oscillator::{Oscillator, Waveform},
    },
    error::SynthError,
    pitch::{note_to_frequency, A4_NOTE},
};

/// How the modulator oscillator acts on the carrier.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModulationMode {
    #[default]
    None,
    /// Carrier gain follows `0.5 × (modulator + 1) × mod_index`.
    Am,
    /// Carrier frequency deviates by `modulator × mod_index` Hz.
    Fm,
}

impl ModulationMode {
    /// 1 = AM, 2 = FM, anything else = none.
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => ModulationMode::Am,
            2 => ModulationMode::Fm,
            _ => ModulationMode::None,
        }
    }
}

/// A monophonic synthesizer voice: carrier oscillator, optional modulator
/// oscillator and a gated ADSR envelope.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    sample_rate: SampleRate,
    carrier: Oscillator,
    modulator: Oscillator,
    envelope: Envelope,
    modulation: ModulationMode,
    mod_index: f32,
    base_freq: f32,
}

impl Synthesizer {
    pub fn new(config: SynthConfig) -> Result<Self, SynthError> {
        let sample_rate = SampleRate::from_hz(config.sample_rate)?;
        let base_freq = note_to_frequency(A4_NOTE);

        Ok(Self {
            sample_rate,
            carrier: Oscillator::new(config.waveform, base_freq, sample_rate),
            modulator: Oscillator::new(config.waveform, 0.0, sample_rate),
            envelope: Envelope::new(config.envelope, sample_rate),
            modulation: ModulationMode::None,
            mod_index: 0.0,
            base_freq,
        })
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Change the waveform of both carrier and modulator.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.carrier.set_waveform(waveform);
        self.modulator.set_waveform(waveform);
    }

    /// Select the modulation mode. For AM `mod_index` is the gain depth, for
    /// FM it is the peak deviation in Hz.
    pub fn set_modulation(&mut self, mode: ModulationMode, mod_freq: f32, mod_index: f32) {
        self.modulation = mode;
        self.mod_index = mod_index;

        if mode == ModulationMode::None {
            self.modulator.set_frequency(0.0);
            self.modulator.reset();
        } else {
            self.modulator.set_frequency(mod_freq);
        }
    }

    pub fn modulation(&self) -> ModulationMode {
        self.modulation
    }

    /// Start a note: retune the carrier, restart both phases and retrigger
    /// the envelope.
    pub fn note_on(&mut self, note: i32) {
        self.base_freq = note_to_frequency(note);
        log::debug!("note on {} ({:.2} Hz)", note, self.base_freq);

        self.carrier.set_frequency(self.base_freq);
        self.carrier.reset();
        self.modulator.reset();
        self.envelope.note_on();
    }

    /// Release the current note.
    pub fn note_off(&mut self) {
        log::debug!("note off at level {:.3}", self.envelope.level());
        self.envelope.note_off();
    }

    /// Fill `out` with the next samples of the voice.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            let carrier = match self.modulation {
                ModulationMode::None => self.carrier.next_sample(),
                ModulationMode::Am => {
                    let m = self.modulator.next_sample();
                    let gain = 0.5 * (m + 1.0) * self.mod_index;
                    self.carrier.next_sample() * gain
                }
                ModulationMode::Fm => {
                    let m = self.modulator.next_sample();
                    let freq = self.base_freq as f64 + m as f64 * self.mod_index as f64;
                    self.carrier.advance(TAU * freq / self.sample_rate.as_f64());
                    self.carrier.current()
                }
            };

            *sample = carrier * self.envelope.next_sample();
        }
    }

    /// True until the envelope has finished its release.
    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }

    pub fn envelope_level(&self) -> f32 {
        self.envelope.level()
    }
}
