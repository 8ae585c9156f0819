// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Sine carrier generation
//!
//! Only the raw carriers are produced here; envelopes and fades are applied
//! later by the post-processing stage.

use std::f64::consts::PI;

use super::time_grid::TimeGrid;

/// Generate a unit-amplitude sine wave at `frequency_hz` over the grid
pub fn synthesize(grid: &TimeGrid, frequency_hz: f64) -> Vec<f64> {
    grid.map(|t| (2.0 * PI * frequency_hz * t).sin())
}

/// Frequencies of a binaural carrier pair.
///
/// The left ear receives the base frequency and the right ear the base plus
/// the beat, so the interaural difference heard by the listener is exactly
/// the beat frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinauralPair {
    base_hz: f64,
    beat_hz: f64,
}

impl BinauralPair {
    pub fn new(base_hz: f64, beat_hz: f64) -> Self {
        Self { base_hz, beat_hz }
    }

    /// Left carrier frequency
    pub fn left_hz(&self) -> f64 {
        self.base_hz
    }

    /// Right carrier frequency
    pub fn right_hz(&self) -> f64 {
        self.base_hz + self.beat_hz
    }

    /// Perceived beat frequency
    pub fn beat_hz(&self) -> f64 {
        self.beat_hz
    }

    /// Generate the `(left, right)` carriers
    pub fn synthesize(&self, grid: &TimeGrid) -> (Vec<f64>, Vec<f64>) {
        (
            synthesize(grid, self.left_hz()),
            synthesize(grid, self.right_hz()),
        )
    }
}

/// Generate binaural `(left, right)` carriers at `base_hz` and `base_hz + beat_hz`
pub fn synthesize_binaural(grid: &TimeGrid, base_hz: f64, beat_hz: f64) -> (Vec<f64>, Vec<f64>) {
    BinauralPair::new(base_hz, beat_hz).synthesize(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Count rising zero crossings, a rough frequency estimate over one second
    fn rising_crossings(signal: &[f64]) -> usize {
        signal
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count()
    }

    #[test]
    fn test_sine_values() {
        let grid = TimeGrid::new(8000, 1.0);
        let wave = synthesize(&grid, 100.0);
        assert_eq!(wave.len(), 8000);
        assert_eq!(wave[0], 0.0);
        // quarter period of 100 Hz at 8 kHz is 20 samples
        assert!((wave[20] - 1.0).abs() < 1e-12);
        assert!((wave[60] + 1.0).abs() < 1e-12);
        assert!(wave.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_frequency_by_zero_crossings() {
        let grid = TimeGrid::new(44100, 1.0);
        let wave = synthesize(&grid, 200.0);
        let crossings = rising_crossings(&wave);
        assert!((199..=200).contains(&crossings), "got {crossings}");
    }

    #[test]
    fn test_binaural_right_carrier_is_sum() {
        let pair = BinauralPair::new(195.64, 5.5);
        assert_eq!(pair.left_hz(), 195.64);
        assert!((pair.right_hz() - 201.14).abs() < 1e-9);
        assert_eq!(pair.beat_hz(), 5.5);
    }

    #[test]
    fn test_binaural_channels() {
        let grid = TimeGrid::new(44100, 0.5);
        let (left, right) = synthesize_binaural(&grid, 195.64, 5.5);
        assert_eq!(left, synthesize(&grid, 195.64));
        assert_eq!(right, synthesize(&grid, 195.64 + 5.5));
        assert_eq!(left.len(), right.len());
    }

    #[test]
    fn test_zero_beat_gives_identical_channels() {
        let grid = TimeGrid::new(1000, 1.0);
        let (left, right) = synthesize_binaural(&grid, 50.0, 0.0);
        assert_eq!(left, right);
    }
}
