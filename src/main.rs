//! Sidetone CLI - Voice Monitoring Processor
//!
//! Command-line interface for the sidetone processing pipeline.

use clap::Parser;
use env_logger::Env;
use log::info;

use sidetone::cli::{Cli, Commands};
use sidetone::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger; --verbose raises the default level to debug
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Sidetone v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Sidetone v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Process {
            input,
            output,
            volume,
            reverb,
            frame_size,
            settings,
        } => sidetone::cli::commands::process_file(
            &input,
            &output,
            volume,
            reverb,
            frame_size,
            settings.as_deref(),
        ),
        Commands::Tone {
            output,
            frequency,
            duration,
            sample_rate,
            amplitude,
        } => sidetone::cli::commands::generate_tone(
            &output,
            frequency,
            duration,
            sample_rate,
            amplitude,
        ),
        Commands::Info { input } => sidetone::cli::commands::show_info(&input),
    }
}
