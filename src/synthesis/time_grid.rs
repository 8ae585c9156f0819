// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Uniform sample instants for one synthesis run

/// Ordered sample instants `t_i = i / sample_rate` for `i` in `0..len`.
///
/// The grid is created once per run and cannot be modified afterwards; every
/// carrier and envelope of the run is evaluated on the same instants so that
/// they stay aligned sample for sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    sample_rate: u32,
    instants: Vec<f64>,
}

impl TimeGrid {
    /// Build a grid of `trunc(duration_seconds * sample_rate)` instants.
    ///
    /// Non-positive or non-finite durations produce an empty grid.
    pub fn new(sample_rate: u32, duration_seconds: f64) -> Self {
        let len = if duration_seconds.is_finite() && duration_seconds > 0.0 {
            (duration_seconds * sample_rate as f64) as usize
        } else {
            0
        };
        Self::with_len(sample_rate, len)
    }

    /// Build a grid with an explicit number of samples
    pub fn with_len(sample_rate: u32, len: usize) -> Self {
        let step = if sample_rate == 0 {
            0.0
        } else {
            1.0 / sample_rate as f64
        };
        let instants = (0..len).map(|i| i as f64 * step).collect();
        Self {
            sample_rate,
            instants,
        }
    }

    /// Sample rate the grid was built for, in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of instants
    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// Duration covered by the grid in seconds
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// The sample instants, in seconds
    pub fn instants(&self) -> &[f64] {
        &self.instants
    }

    /// Evaluate `f(t)` at every instant of the grid
    pub fn map<F>(&self, f: F) -> Vec<f64>
    where
        F: Fn(f64) -> f64,
    {
        self.instants.iter().map(|&t| f(t)).collect()
    }
}
