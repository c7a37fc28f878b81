//! ozsynth - offline synthesis from the command line
//!
//! Run with: cargo run -- render --note 57 --fm 120 --mod-freq 110

mod app;

use clap::Parser;

use app::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level)?;

    cli.run()
}
