// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Synthesis configuration
//!
//! This module defines the parameters of one synthesis run and the two
//! built-in sessions they are usually taken from.

use serde::{Deserialize, Serialize};

use crate::synthesis::{EnvelopeError, Lfo};

/// Built-in parameter sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    /// Three minutes of pure tone with a slow stellar breathing envelope
    Pure,
    /// Binaural theta beat with an 8 s guided breathing envelope
    Breath,
}

impl Session {
    /// Default file stem of the artifacts produced by the session
    pub fn file_stem(&self) -> &'static str {
        match self {
            Session::Pure => "Polaris_Pure",
            Session::Breath => "Polaris_Pure_Breath",
        }
    }
}

/// Configuration for the frequency derivation and the synthesis pipeline.
///
/// # Frequency
///
/// * `pulsation_period_days` - Period of the star (Polaris Aa: 3.97 days)
/// * `octave_shift` - Manual calibration constant `n` of `f = 2^n / T`
/// * `frequency_hz` - Optional explicit carrier, bypassing the derivation
///
/// # Shaping
///
/// * `binaural_beat_hz` - Right ear offset; `0` renders a mono carrier
/// * `breath_cycle_seconds` - Period of the breathing envelope
/// * `envelope_min` / `envelope_max` - Envelope range, `0 <= min < max <= 1`
/// * `fade_seconds` - Linear fade at both ends
/// * `headroom` - Peak amplitude after normalization, in (0, 1]
///
/// # Example
///
/// ```
/// use stellar_tone::config::{Session, SynthesisConfig};
///
/// let breath = SynthesisConfig::for_session(Session::Breath);
/// assert!(breath.is_binaural());
/// assert_eq!(breath.breath_cycle_seconds, 8.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Length of the artifact in seconds
    pub duration_seconds: f64,

    /// Pulsation period in days
    #[serde(default = "default_pulsation_period_days")]
    pub pulsation_period_days: f64,

    /// Octave shift applied to the base frequency
    #[serde(default = "default_octave_shift")]
    pub octave_shift: u32,

    /// Carrier frequency override in Hz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_hz: Option<f64>,

    /// Binaural beat in Hz, 0 disables binaural rendering
    #[serde(default)]
    pub binaural_beat_hz: f64,

    pub breath_cycle_seconds: f64,

    pub envelope_min: f64,

    pub envelope_max: f64,

    pub fade_seconds: f64,

    pub headroom: f64,
}

fn default_sample_rate() -> u32 {
    44100 // CD quality
}

fn default_pulsation_period_days() -> f64 {
    3.97 // Polaris Aa
}

fn default_octave_shift() -> u32 {
    26 // lands Polaris on G3
}

impl SynthesisConfig {
    /// Parameters of a built-in session
    pub fn for_session(session: Session) -> Self {
        match session {
            Session::Pure => Self {
                sample_rate: default_sample_rate(),
                duration_seconds: 180.0,
                pulsation_period_days: default_pulsation_period_days(),
                octave_shift: default_octave_shift(),
                frequency_hz: None,
                binaural_beat_hz: 0.0,
                breath_cycle_seconds: 10.0,
                envelope_min: 0.6,
                envelope_max: 1.0,
                fade_seconds: 3.0,
                headroom: 0.8,
            },
            Session::Breath => Self {
                sample_rate: default_sample_rate(),
                duration_seconds: 32.0,
                pulsation_period_days: default_pulsation_period_days(),
                octave_shift: default_octave_shift(),
                frequency_hz: None,
                binaural_beat_hz: 5.5,
                breath_cycle_seconds: 8.0,
                envelope_min: 0.4,
                envelope_max: 1.0,
                fade_seconds: 5.0,
                headroom: 0.9,
            },
        }
    }

    /// True when left and right carriers differ by a beat frequency
    pub fn is_binaural(&self) -> bool {
        self.binaural_beat_hz > 0.0
    }

    /// Breathing envelope oscillator
    pub fn lfo(&self) -> Result<Lfo, EnvelopeError> {
        Lfo::from_cycle(
            self.breath_cycle_seconds,
            self.envelope_min,
            self.envelope_max,
        )
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self::for_session(Session::Pure)
    }
}
