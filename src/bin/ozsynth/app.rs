//! Command definitions and the render pipeline behind them

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use log::info;

use ozsynth::{
    analysis, apply_adsr, apply_am, apply_fm,
    dsp::{
        amplify,
        oscillator::{generate_wave, Waveform},
    },
    generate_sine_wave, note_to_frequency,
    pitch::{note_name, parse_note_name},
    DEFAULT_SAMPLE_RATE,
};

#[derive(Debug, Parser)]
#[command(name = "ozsynth", about = "Render and inspect synthesized notes")]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the frequency of a note number or name (e.g. 69, A4, C#3)
    Freq { note: String },
    /// Render a note through oscillator, modulation and envelope and print
    /// level and pitch statistics
    Render(RenderArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WaveArg {
    Sine,
    Square,
    Saw,
    Triangle,
}

impl From<WaveArg> for Waveform {
    fn from(arg: WaveArg) -> Self {
        match arg {
            WaveArg::Sine => Waveform::Sine,
            WaveArg::Square => Waveform::Square,
            WaveArg::Saw => Waveform::Saw,
            WaveArg::Triangle => Waveform::Triangle,
        }
    }
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Note number or name
    #[arg(long, default_value = "69")]
    note: String,
    /// Length in seconds
    #[arg(long, default_value_t = 1.0)]
    duration: f32,
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE as i32, allow_negative_numbers = true)]
    sample_rate: i32,
    #[arg(long, value_enum, default_value_t = WaveArg::Sine)]
    waveform: WaveArg,
    /// Amplitude-modulation depth
    #[arg(long, conflicts_with = "fm", allow_negative_numbers = true)]
    am: Option<f32>,
    /// Frequency-modulation index in Hz of deviation (sine carrier only)
    #[arg(long, conflicts_with = "waveform", allow_negative_numbers = true)]
    fm: Option<f32>,
    /// Modulator frequency in Hz
    #[arg(long, default_value_t = 5.0)]
    mod_freq: f32,
    #[arg(long, default_value_t = 0.01)]
    attack: f32,
    #[arg(long, default_value_t = 0.1)]
    decay: f32,
    #[arg(long, default_value_t = 0.8, allow_negative_numbers = true)]
    sustain: f32,
    #[arg(long, default_value_t = 0.3)]
    release: f32,
}

impl Cli {
    pub fn run(self) -> EyreResult<()> {
        match self.command {
            Command::Freq { note } => {
                let note = resolve_note(&note)?;
                println!("{} ({}): {:.3} Hz", note, note_name(note), note_to_frequency(note));
                Ok(())
            }
            Command::Render(args) => render(&args),
        }
    }
}

fn resolve_note(input: &str) -> EyreResult<i32> {
    if let Ok(note) = input.trim().parse::<i32>() {
        return Ok(note);
    }
    parse_note_name(input).wrap_err_with(|| format!("could not read note '{}'", input))
}

fn render(args: &RenderArgs) -> EyreResult<()> {
    let note = resolve_note(&args.note)?;
    let frequency = note_to_frequency(note);
    let rate = args.sample_rate;
    info!(
        "rendering {} ({:.2} Hz) for {}s at {} Hz",
        note_name(note),
        frequency,
        args.duration,
        rate
    );

    let modulator = generate_sine_wave(args.mod_freq, args.duration, rate)
        .wrap_err("failed to render modulator")?;

    let voiced = match (args.am, args.fm) {
        (_, Some(index)) => {
            info!("fm index {} at {} Hz", index, args.mod_freq);
            apply_fm(frequency, &modulator, index, rate).wrap_err("failed to apply fm")?
        }
        (Some(depth), None) => {
            info!("am depth {} at {} Hz", depth, args.mod_freq);
            let carrier = generate_wave(args.waveform.into(), frequency, args.duration, rate)
                .wrap_err("failed to render carrier")?;
            apply_am(&carrier, &modulator, depth)
        }
        (None, None) => generate_wave(args.waveform.into(), frequency, args.duration, rate)
            .wrap_err("failed to render carrier")?,
    };

    let shaped = apply_adsr(
        &voiced,
        rate,
        args.attack,
        args.decay,
        args.sustain,
        args.release,
    )
    .wrap_err("failed to apply envelope")?;

    println!("samples:  {}", shaped.len());
    println!("peak:     {:.4}", amplify::peak(&shaped));
    println!("rms:      {:.4}", amplify::rms(&shaped));

    match spectrum_window(&voiced) {
        Some(window) => {
            let dominant = analysis::dominant_frequency(window, rate)
                .wrap_err("spectrum analysis failed")?;
            println!("dominant: {:.1} Hz (FFT of {} samples)", dominant, window.len());
        }
        None => println!("dominant: n/a (buffer too short)"),
    }

    Ok(())
}

// largest power-of-two prefix, at least 64 samples
fn spectrum_window(samples: &[f32]) -> Option<&[f32]> {
    if samples.len() < 64 {
        return None;
    }
    let len = 1usize << (usize::BITS - 1 - samples.len().leading_zeros());
    Some(&samples[..len])
}
