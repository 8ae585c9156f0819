// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the tone generator
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings. The configuration is backed by a YAML file and
//! validated against a JSON schema before being deserialized.
//!
//! ## Configuration Structure
//!
//! The configuration is organized in sections:
//! - `synthesis`: frequency derivation and signal shaping parameters
//! - `output`: artifact directory, file naming and preview settings
//! - `reference`: musical pitch used for comparison in reports
//!
//! ## Usage
//!
//! ```no_run
//! use stellar_tone::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(
//!     Some(60.0),                 // Duration
//!     None,                       // Pulsation period
//!     Some(25),                   // Octave shift
//!     None,                       // Frequency override
//!     Some(5.5),                  // Binaural beat
//!     None,                       // Fade
//!     None,                       // Headroom
//!     Some("out".to_string()),    // Output directory
//!     None,                       // Preview
//! );
//!
//! println!("Octave shift: {}", config.synthesis.octave_shift);
//! ```

pub mod output;
pub mod synthesis;
pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

pub use output::{OutputConfig, ReferenceConfig};
pub use synthesis::{Session, SynthesisConfig};
pub use utils::{output_config_schema, validate_specific_rules};

/// Embedded JSON schema of the configuration file
pub(crate) const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Root configuration structure.
///
/// Each section falls back to its defaults (the `pure` session) when it is
/// absent from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Frequency derivation and synthesis parameters
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Artifact output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Reference pitch for the frequency report
    #[serde(default)]
    pub reference: ReferenceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_session(Session::Pure)
    }
}

impl Config {
    /// Configuration of a built-in session
    pub fn for_session(session: Session) -> Self {
        Self {
            synthesis: SynthesisConfig::for_session(session),
            output: OutputConfig::for_session(session),
            reference: ReferenceConfig::default(),
        }
    }

    /// Replace synthesis parameters and file stem with those of a session.
    ///
    /// The output directory, preview settings and reference pitch are kept.
    pub fn apply_session(&mut self, session: Session) {
        debug!("Applying session defaults: {:?}", session);
        self.synthesis = SynthesisConfig::for_session(session);
        self.output.file_stem = session.file_stem().to_string();
    }

    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Original path: {:?}, Sample path: {:?}", path, sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// A missing file is created with default values. A file failing schema
    /// validation, deserialization or the specific rules produces a
    /// `*.sample.yaml` next to it and an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        // YAML to a generic value, then to JSON for schema validation
        let yaml_value: serde_yml::Value = serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML configuration from {:?}", path))?;
        let json_value = serde_json::to_value(&yaml_value).with_context(|| {
            format!("Failed to convert YAML to JSON for validation: {:?}", path)
        })?;

        let schema: serde_json::Value =
            serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;
        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        debug!("Validating {} configuration against schema", path.display());
        if let Err(error) = validator.validate(&json_value) {
            error!("Configuration validation error before deserialization");
            Self::create_sample_config(path)?;
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        debug!("Schema validation passed, deserializing into Config structure");
        let config: Config = match serde_yml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                error!("Configuration deserialization error: {}", err);
                if let Err(e) = Self::create_sample_config(path) {
                    error!("Failed to create sample config: {}", e);
                }
                return Err(anyhow::anyhow!(
                    "Failed to deserialize configuration from {}: {}",
                    path.display(),
                    err
                ));
            }
        };

        if let Err(err) = validate_specific_rules(&config) {
            error!("Configuration specific validation error: {}", err);
            Self::create_sample_config(path)?;
            return Err(err);
        }

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// Only the provided values override the existing configuration.
    ///
    /// # Parameters
    ///
    /// * `duration_seconds` - Artifact length in seconds
    /// * `pulsation_period_days` - Pulsation period in days
    /// * `octave_shift` - Octave shift of the base frequency
    /// * `frequency_hz` - Explicit carrier frequency, bypassing the derivation
    /// * `binaural_beat_hz` - Binaural beat, 0 for a mono carrier
    /// * `fade_seconds` - Fade length in seconds
    /// * `headroom` - Peak amplitude after normalization
    /// * `output_directory` - Directory receiving the artifacts
    /// * `preview` - Enable or disable the waveform preview
    #[allow(clippy::too_many_arguments)]
    pub fn apply_args(
        &mut self,
        duration_seconds: Option<f64>,
        pulsation_period_days: Option<f64>,
        octave_shift: Option<u32>,
        frequency_hz: Option<f64>,
        binaural_beat_hz: Option<f64>,
        fade_seconds: Option<f64>,
        headroom: Option<f64>,
        output_directory: Option<String>,
        preview: Option<bool>,
    ) {
        if let Some(duration) = duration_seconds {
            debug!("Overriding duration from command line: {}", duration);
            self.synthesis.duration_seconds = duration;
        }
        if let Some(period) = pulsation_period_days {
            debug!("Overriding pulsation period from command line: {}", period);
            self.synthesis.pulsation_period_days = period;
        }
        if let Some(shift) = octave_shift {
            debug!("Overriding octave shift from command line: {}", shift);
            self.synthesis.octave_shift = shift;
        }
        if let Some(freq) = frequency_hz {
            debug!("Overriding carrier frequency from command line: {}", freq);
            self.synthesis.frequency_hz = Some(freq);
        }
        if let Some(beat) = binaural_beat_hz {
            debug!("Overriding binaural beat from command line: {}", beat);
            self.synthesis.binaural_beat_hz = beat;
        }
        if let Some(fade) = fade_seconds {
            debug!("Overriding fade from command line: {}", fade);
            self.synthesis.fade_seconds = fade;
        }
        if let Some(headroom) = headroom {
            debug!("Overriding headroom from command line: {}", headroom);
            self.synthesis.headroom = headroom;
        }
        if let Some(directory) = output_directory {
            debug!("Overriding output directory from command line: {}", directory);
            self.output.directory = directory;
        }
        if let Some(preview) = preview {
            debug!("Overriding preview from command line: {}", preview);
            self.output.preview = preview;
        }
    }
}
