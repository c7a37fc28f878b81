use crate::config::SampleRate;
use crate::error::SynthError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
ADSR Envelopes
==============

An ADSR envelope is a gain curve with four stages. Multiplying a signal by it
gives a note its shape over time.

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release

All ramps are LINEAR.

This module has two forms of the same shape.


Buffer Form: apply_adsr
-----------------------

The whole note already exists as a buffer, so the stages are laid out by
sample count up front:

    attack_len  = round(attack  × sample_rate)
    decay_len   = round(decay   × sample_rate)
    release_len = round(release × sample_rate)
    sustain_len = whatever is left

Partition rule when the stages do not fit: attack is granted first, then
decay, then release, each clamped to the samples still unclaimed. Release is
therefore the first stage to be cut short, then decay, then attack. The four
regions always tile the buffer exactly, with no gap and no overlap.

    [ attack | decay | sustain ........ | release ]
    0        a       a+d                len-r     len

Multiplier per region, with j the index inside the region:

    attack    j / attack_len                     0.0 at the first sample
    decay     1 - (1 - S) × j / decay_len         1.0 at the first sample
    sustain   S
    release   S × (1 - (j + 1) / release_len)     0.0 at the last sample

Zero-length stages simply vanish. With A = D = R = 0 and S = 1 every sample is
multiplied by exactly 1.0, so the input comes back unchanged. The sustain
level is not clamped here: a level above 1 boosts and a negative level inverts.


Streaming Form: Envelope
------------------------

A voice does not know how long the note will be held, so `Envelope` is a
state machine driven by gate events:

    Idle ──note_on──→ Attack ──level=1──→ Decay ──level=S──→ Sustain
      ↑                  │                  │                   │
      │                  └──────note_off────┴───────────────────┘
      │                                     ↓
      └──────────────level=0───────────  Release

note_off may arrive in any active stage. Release always ramps from the
CURRENT level, not from S, so releasing mid-attack does not click.
*/

/// Stage durations in seconds plus the sustain level.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain_level: f32,
    pub release: f32,
}

impl AdsrParams {
    pub fn new(attack: f32, decay: f32, sustain_level: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain_level,
            release,
        }
    }
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self::new(0.01, 0.1, 0.8, 0.3)
    }
}

/// The current stage of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Sample counts of the four regions of a buffer envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeRegions {
    pub attack: usize,
    pub decay: usize,
    pub sustain: usize,
    pub release: usize,
}

impl EnvelopeRegions {
    /// Lay out the regions for a buffer of `len` samples.
    pub fn partition(len: usize, params: &AdsrParams, sample_rate: SampleRate) -> Self {
        let mut remaining = len;
        let mut claim = |seconds: f32| {
            let samples = sample_rate.samples_for(seconds).min(remaining);
            remaining -= samples;
            samples
        };

        let attack = claim(params.attack);
        let decay = claim(params.decay);
        let release = claim(params.release);

        Self {
            attack,
            decay,
            sustain: remaining,
            release,
        }
    }

    pub fn len(&self) -> usize {
        self.attack + self.decay + self.sustain + self.release
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn decay_start(&self) -> usize {
        self.attack
    }

    fn sustain_start(&self) -> usize {
        self.attack + self.decay
    }

    fn release_start(&self) -> usize {
        self.attack + self.decay + self.sustain
    }

    /// Which region sample `index` falls in. Indices past the end report
    /// `Idle`.
    pub fn stage_at(&self, index: usize) -> EnvelopeStage {
        if index < self.decay_start() {
            EnvelopeStage::Attack
        } else if index < self.sustain_start() {
            EnvelopeStage::Decay
        } else if index < self.release_start() {
            EnvelopeStage::Sustain
        } else if index < self.len() {
            EnvelopeStage::Release
        } else {
            EnvelopeStage::Idle
        }
    }

    /// Envelope gain at sample `index`.
    pub fn multiplier(&self, index: usize, sustain_level: f32) -> f32 {
        match self.stage_at(index) {
            EnvelopeStage::Attack => index as f32 / self.attack as f32,
            EnvelopeStage::Decay => {
                let j = (index - self.decay_start()) as f32;
                1.0 - (1.0 - sustain_level) * j / self.decay as f32
            }
            EnvelopeStage::Sustain => sustain_level,
            EnvelopeStage::Release => {
                let j = (index - self.release_start()) as f32;
                sustain_level * (1.0 - (j + 1.0) / self.release as f32)
            }
            EnvelopeStage::Idle => 0.0,
        }
    }
}

/// Shape `samples` with an ADSR envelope, returning a new buffer of the same
/// length.
///
/// Stage lengths are rounded to whole samples and granted in the order
/// attack, decay, release; sustain takes what remains. Fails only when
/// `sample_rate` is not positive.
pub fn apply_adsr(
    samples: &[f32],
    sample_rate: i32,
    attack: f32,
    decay: f32,
    sustain_level: f32,
    release: f32,
) -> Result<Vec<f32>, SynthError> {
    let rate = SampleRate::new(sample_rate)?;
    let params = AdsrParams::new(attack, decay, sustain_level, release);
    Ok(shape(samples, rate, &params))
}

/// [`apply_adsr`] taking the parameters as one struct.
pub fn apply_adsr_with(
    samples: &[f32],
    sample_rate: i32,
    params: &AdsrParams,
) -> Result<Vec<f32>, SynthError> {
    let rate = SampleRate::new(sample_rate)?;
    Ok(shape(samples, rate, params))
}

/// The bare envelope curve for a buffer of `len` samples.
pub fn envelope_curve(
    len: usize,
    sample_rate: i32,
    params: &AdsrParams,
) -> Result<Vec<f32>, SynthError> {
    let rate = SampleRate::new(sample_rate)?;
    let regions = EnvelopeRegions::partition(len, params, rate);
    Ok((0..len)
        .map(|i| regions.multiplier(i, params.sustain_level))
        .collect())
}

fn shape(samples: &[f32], rate: SampleRate, params: &AdsrParams) -> Vec<f32> {
    let regions = EnvelopeRegions::partition(samples.len(), params, rate);
    log::trace!("adsr regions {:?} over {} samples", regions, samples.len());

    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| s * regions.multiplier(i, params.sustain_level))
        .collect()
}

/// Gate-driven ADSR generator for streaming voices.
#[derive(Debug, Clone)]
pub struct Envelope {
    params: AdsrParams,
    sample_rate: SampleRate,

    stage: EnvelopeStage,
    level: f32,
    stage_elapsed: usize,

    // snapshot taken at note_off
    release_start_level: f32,
}

impl Envelope {
    /// Build an envelope. Sustain is clamped to [0, 1] so the streamed level
    /// never leaves that range; a NaN sustain holds at zero.
    pub fn new(params: AdsrParams, sample_rate: SampleRate) -> Self {
        let sustain_level = if params.sustain_level.is_nan() {
            0.0
        } else {
            params.sustain_level.clamp(0.0, 1.0)
        };

        Self {
            params: AdsrParams {
                sustain_level,
                ..params
            },
            sample_rate,
            stage: EnvelopeStage::Idle,
            level: 0.0,
            stage_elapsed: 0,
            release_start_level: 0.0,
        }
    }

    /// Gate high: restart the attack from zero.
    pub fn note_on(&mut self) {
        self.level = 0.0;
        self.enter(EnvelopeStage::Attack);
    }

    /// Gate low: release from the current level.
    pub fn note_off(&mut self) {
        if matches!(self.stage, EnvelopeStage::Idle | EnvelopeStage::Release) {
            return;
        }
        self.release_start_level = self.level;
        self.enter(EnvelopeStage::Release);
    }

    /// Advance one sample and return the new level.
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }
            EnvelopeStage::Attack => {
                let total = self.stage_samples(self.params.attack);
                self.stage_elapsed += 1;
                self.level = self.stage_elapsed as f32 / total as f32;

                if self.stage_elapsed >= total {
                    self.level = 1.0;
                    self.enter(EnvelopeStage::Decay);
                }
            }
            EnvelopeStage::Decay => {
                let total = self.stage_samples(self.params.decay);
                let sustain = self.params.sustain_level;
                self.stage_elapsed += 1;
                self.level = 1.0 - (1.0 - sustain) * self.stage_elapsed as f32 / total as f32;

                if self.stage_elapsed >= total {
                    self.level = sustain;
                    self.enter(EnvelopeStage::Sustain);
                }
            }
            EnvelopeStage::Sustain => {
                self.level = self.params.sustain_level;
            }
            EnvelopeStage::Release => {
                let total = self.stage_samples(self.params.release);
                self.stage_elapsed += 1;
                let progress = self.stage_elapsed as f32 / total as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                if self.stage_elapsed >= total {
                    self.level = 0.0;
                    self.enter(EnvelopeStage::Idle);
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Fill `buffer` with successive envelope levels.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeStage::Idle)
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
        self.release_start_level = 0.0;
        self.enter(EnvelopeStage::Idle);
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn params(&self) -> &AdsrParams {
        &self.params
    }

    fn enter(&mut self, stage: EnvelopeStage) {
        self.stage = stage;
        self.stage_elapsed = 0;
    }

    // zero-length stages still take one sample so each transition is observable
    fn stage_samples(&self, seconds: f32) -> usize {
        self.sample_rate.samples_for(seconds).max(1)
    }
}
