// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use anyhow::{Context, Result};
use log::debug;

use super::{Config, CONFIG_SCHEMA};
use crate::frequency::FrequencyDerivation;

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./stellar_tone --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;
    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;
    println!("{}", formatted_schema);
    Ok(())
}

/// Validates the configuration against rules the JSON schema cannot express.
///
/// * the envelope range must satisfy `0 <= min < max <= 1`
/// * headroom must be in (0, 1]
/// * the carrier (derived or overridden) must be positive and, together with
///   the binaural beat, stay below the Nyquist frequency
/// * the file stem must not contain path separators
///
/// # Returns
///
/// * `Ok(())` if all validations pass
/// * `Err(anyhow::Error)` with descriptive message if any validation fails
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");
    let synthesis = &config.synthesis;

    if synthesis.sample_rate == 0 {
        anyhow::bail!("Sample rate must be positive");
    }
    if !(synthesis.duration_seconds.is_finite() && synthesis.duration_seconds > 0.0) {
        anyhow::bail!("Invalid duration: {}", synthesis.duration_seconds);
    }
    if !(0.0 <= synthesis.envelope_min
        && synthesis.envelope_min < synthesis.envelope_max
        && synthesis.envelope_max <= 1.0)
    {
        anyhow::bail!(
            "Invalid envelope range [{}, {}]: expected 0 <= min < max <= 1",
            synthesis.envelope_min,
            synthesis.envelope_max
        );
    }
    if !(synthesis.headroom > 0.0 && synthesis.headroom <= 1.0) {
        anyhow::bail!("Invalid headroom {}: expected (0, 1]", synthesis.headroom);
    }
    if !(synthesis.fade_seconds.is_finite() && synthesis.fade_seconds >= 0.0) {
        anyhow::bail!("Invalid fade duration: {}", synthesis.fade_seconds);
    }
    if !(synthesis.binaural_beat_hz.is_finite() && synthesis.binaural_beat_hz >= 0.0) {
        anyhow::bail!("Invalid binaural beat: {}", synthesis.binaural_beat_hz);
    }
    synthesis
        .lfo()
        .context("Invalid breathing envelope configuration")?;

    let carrier_hz = match synthesis.frequency_hz {
        Some(freq) if freq.is_finite() && freq > 0.0 => freq,
        Some(freq) => anyhow::bail!("Invalid carrier frequency override: {}", freq),
        None => {
            FrequencyDerivation::compute(synthesis.pulsation_period_days, synthesis.octave_shift)
                .context("Invalid pulsation frequency settings")?
                .audible_hz
        }
    };
    let nyquist = synthesis.sample_rate as f64 / 2.0;
    if carrier_hz + synthesis.binaural_beat_hz >= nyquist {
        anyhow::bail!(
            "Carrier {:.2} Hz (+{} Hz beat) is above the Nyquist frequency {} Hz",
            carrier_hz,
            synthesis.binaural_beat_hz,
            nyquist
        );
    }

    let stem = &config.output.file_stem;
    if stem.is_empty() || stem.contains(|c| c == '/' || c == '\\') {
        anyhow::bail!("Invalid file stem {:?}: must be a bare file name", stem);
    }
    if config.output.preview
        && !(config.output.preview_seconds.is_finite() && config.output.preview_seconds > 0.0)
    {
        anyhow::bail!(
            "Invalid preview length: {}",
            config.output.preview_seconds
        );
    }
    if !(config.reference.pitch_hz.is_finite() && config.reference.pitch_hz > 0.0) {
        anyhow::bail!("Invalid reference pitch: {}", config.reference.pitch_hz);
    }

    Ok(())
}
