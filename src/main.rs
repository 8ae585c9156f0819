// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the stellar tone generator

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use stellar_tone::config::{self, Config, Session};
use stellar_tone::output::{PlotPreview, WaveformPreview};
use stellar_tone::pipeline;
use stellar_tone::report::ConsoleReporter;

/// Pulsation frequency tone generator
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Built-in session (pure tone or binaural breathing)
    #[arg(short = 's', long, value_enum)]
    session: Option<Session>,

    /// Path to configuration file (YAML format)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a configuration to validate and exit
    #[arg(long)]
    validate_config: Option<PathBuf>,

    /// Output the configuration schema as JSON and exit
    #[arg(long)]
    show_config_schema: bool,

    /// Duration of the artifact in seconds
    #[arg(short = 'd', long)]
    duration: Option<f64>,

    /// Pulsation period in days
    #[arg(long)]
    period_days: Option<f64>,

    /// Octave shift applied to the base frequency
    #[arg(short = 'n', long)]
    octave_shift: Option<u32>,

    /// Carrier frequency in Hz, bypassing the period derivation
    #[arg(short = 'f', long)]
    frequency: Option<f64>,

    /// Binaural beat in Hz (0 renders a mono carrier)
    #[arg(short = 'b', long)]
    beat: Option<f64>,

    /// Fade-in / fade-out length in seconds
    #[arg(long)]
    fade: Option<f64>,

    /// Peak amplitude after normalization (0 to 1)
    #[arg(long)]
    headroom: Option<f64>,

    /// Output directory
    #[arg(short = 'o', long)]
    output_dir: Option<String>,

    /// Skip the waveform preview image
    #[arg(long)]
    no_preview: bool,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Disable all logging output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.quiet {
        log::LevelFilter::Off
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if args.show_config_schema {
        return config::output_config_schema();
    }

    if let Some(validate_path) = args.validate_config {
        if !validate_path.exists() {
            return Err(anyhow::anyhow!(
                "Configuration file does not exist: {}",
                validate_path.display()
            ));
        }

        Config::from_file(&validate_path)
            .map_err(|err| anyhow::anyhow!("Configuration validation failed: {}", err))?;
        println!("Configuration file is valid: {}", validate_path.display());
        return Ok(());
    }

    // A configuration file is optional; without one the session defaults apply
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::for_session(args.session.unwrap_or(Session::Pure)),
    };
    if let (Some(session), Some(_)) = (args.session, &args.config) {
        config.apply_session(session);
    }

    config.apply_args(
        args.duration,
        args.period_days,
        args.octave_shift,
        args.frequency,
        args.beat,
        args.fade,
        args.headroom,
        args.output_dir.clone(),
        args.no_preview.then_some(false),
    );
    config::validate_specific_rules(&config)?;

    info!(
        "Rendering {} s at {} Hz into {}",
        config.synthesis.duration_seconds,
        config.synthesis.sample_rate,
        config.output.directory
    );

    let plot = PlotPreview::default();
    let preview: Option<&dyn WaveformPreview> = Some(&plot);
    let outcome = pipeline::run(&config, &mut ConsoleReporter, preview)?;

    println!("Features: pure sine carrier, breathing envelope, no added noise.");
    if let Some(pair) = outcome.audio.binaural {
        println!(
            "Binaural beat: {:.2} Hz (left {:.2} Hz / right {:.2} Hz)",
            pair.beat_hz(),
            pair.left_hz(),
            pair.right_hz()
        );
    }

    Ok(())
}
