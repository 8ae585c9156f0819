// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Breathing Envelopes
//!
//! Low-frequency oscillators (LFO) used as amplitude envelopes. The level at
//! time `t` is
//!
//! ```text
//! level(t) = min + ((sin(2π·f·t) + 1) / 2) · (max - min)
//! ```
//!
//! so the envelope swings between `min` and `max` once every `1/f` seconds
//! and never reaches silence as long as `min > 0`.
//!
//! Two presets are used by the sessions:
//!
//! * stellar breathing: 0.1 Hz (10 s cycle) between 60 % and 100 %
//! * breath pacing: 0.125 Hz (8 s cycle, 4 s in / 4 s out) between 40 % and 100 %

use std::f64::consts::PI;
use std::ops::Index;

use thiserror::Error;

use super::time_grid::TimeGrid;

/// Errors for invalid LFO parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    #[error("Envelope levels must be finite with min <= max, got [{min}, {max}]")]
    InvalidLevels { min: f64, max: f64 },
    #[error("Oscillator frequency must be finite and non-negative, got {0} Hz")]
    InvalidRate(f64),
    #[error("Breath cycle must be a positive number of seconds, got {0}")]
    InvalidCycle(f64),
}

/// Parameters of a sine LFO
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lfo {
    pub rate_hz: f64,
    pub min_level: f64,
    pub max_level: f64,
}

impl Lfo {
    pub fn new(rate_hz: f64, min_level: f64, max_level: f64) -> Self {
        Self {
            rate_hz,
            min_level,
            max_level,
        }
    }

    /// LFO completing one cycle every `cycle_seconds`
    pub fn from_cycle(
        cycle_seconds: f64,
        min_level: f64,
        max_level: f64,
    ) -> Result<Self, EnvelopeError> {
        if !cycle_seconds.is_finite() || cycle_seconds <= 0.0 {
            return Err(EnvelopeError::InvalidCycle(cycle_seconds));
        }
        Ok(Self::new(1.0 / cycle_seconds, min_level, max_level))
    }

    /// Slow luminosity "breathing" of a Cepheid: 10 s cycle, 60 % to 100 %
    pub fn stellar_breathing() -> Self {
        Self::new(0.1, 0.6, 1.0)
    }

    /// Guided breathing rhythm: 8 s cycle, 40 % to 100 %
    pub fn breath_pacing() -> Self {
        Self::new(1.0 / 8.0, 0.4, 1.0)
    }

    /// Evaluate the LFO on a grid
    pub fn generate(&self, grid: &TimeGrid) -> Result<Envelope, EnvelopeError> {
        generate_lfo(grid, self.rate_hz, self.min_level, self.max_level)
    }
}

/// Amplitude multipliers aligned with a [`TimeGrid`]
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    levels: Vec<f64>,
}

impl Envelope {
    /// Wrap precomputed levels
    pub fn from_levels(levels: Vec<f64>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Index<usize> for Envelope {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.levels[index]
    }
}

/// Generate a sine LFO envelope over `grid`.
///
/// # Errors
///
/// Returns [`EnvelopeError`] when the levels are not finite or inverted, or
/// when the oscillator frequency is negative or not finite.
pub fn generate_lfo(
    grid: &TimeGrid,
    osc_freq_hz: f64,
    min_level: f64,
    max_level: f64,
) -> Result<Envelope, EnvelopeError> {
    if !min_level.is_finite() || !max_level.is_finite() || min_level > max_level {
        return Err(EnvelopeError::InvalidLevels {
            min: min_level,
            max: max_level,
        });
    }
    if !osc_freq_hz.is_finite() || osc_freq_hz < 0.0 {
        return Err(EnvelopeError::InvalidRate(osc_freq_hz));
    }

    let depth = max_level - min_level;
    let levels = grid.map(|t| {
        let pulse = ((2.0 * PI * osc_freq_hz * t).sin() + 1.0) * 0.5;
        // rounding can push min + depth past max by one ulp
        (min_level + pulse * depth).clamp(min_level, max_level)
    });

    Ok(Envelope { levels })
}
