// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Pulsation frequency calculator
// Prints the period-to-frequency derivation without rendering any audio

use anyhow::Result;
use clap::Parser;

use stellar_tone::frequency::FrequencyDerivation;
use stellar_tone::report::{report_derivation, ConsoleReporter};

/// Convert a stellar pulsation period into an audible frequency
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pulsation period in days (Polaris Aa: 3.97)
    #[arg(short, long, default_value_t = 3.97)]
    period_days: f64,

    /// Octave shift applied to the base frequency
    #[arg(short = 'n', long, default_value_t = 26)]
    octave_shift: u32,

    /// Reference pitch in Hz the result is compared against
    #[arg(short, long, default_value_t = 196.0)]
    reference_hz: f64,

    /// Name of the reference pitch
    #[arg(long, default_value = "G3")]
    reference_name: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("--- START: Pulsation Frequency Calculation ---");
    let derivation = FrequencyDerivation::compute(args.period_days, args.octave_shift)?;
    report_derivation(
        &mut ConsoleReporter,
        &derivation,
        Some((args.reference_hz, args.reference_name.as_str())),
    );
    println!("{}", "-".repeat(40));

    Ok(())
}
