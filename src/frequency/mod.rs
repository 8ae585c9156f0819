// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Pulsation Frequency Derivation
//!
//! Converts the pulsation period of a variable star into an audible frequency
//! using the "cosmic octave" relation:
//!
//! ```text
//! f = (1 / T) * 2^n
//! ```
//!
//! where `T` is the period in seconds and `n` an integer octave shift. The
//! octave shift is a calibration constant chosen by the caller so that the
//! result lands in the low audible band (roughly 100 Hz to 300 Hz); no search
//! for `n` is performed here.
//!
//! ## Examples
//!
//! ```rust
//! use stellar_tone::frequency::derive_frequency;
//!
//! // Polaris Aa pulsates with a period of about 3.97 days
//! let hz = derive_frequency(3.97, 26).unwrap();
//! assert!((hz - 195.64).abs() < 0.01);
//! ```

pub mod notes;

pub use notes::{nearest_note, NoteMatch};

use thiserror::Error;

/// Number of seconds in one day
pub const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Errors raised while deriving a frequency from a period
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrequencyError {
    #[error("Pulsation period must be a positive finite number of days, got {0}")]
    InvalidPeriod(f64),
    #[error("Octave shift {0} overflows the frequency multiplier")]
    OctaveOverflow(u32),
    #[error("Carrier frequency must be a positive finite number of Hz, got {0}")]
    InvalidFrequency(f64),
    #[error("Period of {period_days} days with octave shift {octave_shift} gives an unrepresentable frequency ({audible_hz} Hz)")]
    FrequencyOutOfRange {
        period_days: f64,
        octave_shift: u32,
        audible_hz: f64,
    },
}

/// Derive the audible frequency in Hz for a period given in days.
///
/// # Arguments
///
/// * `period_days` - Physical period of the oscillation in days (must be > 0)
/// * `octave_shift` - Number of octaves to shift the base frequency up
///
/// # Errors
///
/// Returns [`FrequencyError::InvalidPeriod`] for zero, negative or non-finite
/// periods, and [`FrequencyError::FrequencyOutOfRange`] when an extreme period
/// overflows to an infinite or zero frequency.
pub fn derive_frequency(period_days: f64, octave_shift: u32) -> Result<f64, FrequencyError> {
    FrequencyDerivation::compute(period_days, octave_shift).map(|d| d.audible_hz)
}

/// Every intermediate value of a frequency derivation.
///
/// Kept together so that the reporting layer can print the full calculation
/// without recomputing anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyDerivation {
    /// Input period in days
    pub period_days: f64,
    /// Period converted to seconds
    pub period_seconds: f64,
    /// Inaudible base frequency `1 / period_seconds`
    pub base_hz: f64,
    /// Octave shift applied to the base frequency
    pub octave_shift: u32,
    /// Multiplier `2^octave_shift`
    pub multiplier: f64,
    /// Resulting audible frequency
    pub audible_hz: f64,
}

impl FrequencyDerivation {
    /// Run the derivation and keep the intermediate values
    pub fn compute(period_days: f64, octave_shift: u32) -> Result<Self, FrequencyError> {
        if !period_days.is_finite() || period_days <= 0.0 {
            return Err(FrequencyError::InvalidPeriod(period_days));
        }
        let exponent =
            i32::try_from(octave_shift).map_err(|_| FrequencyError::OctaveOverflow(octave_shift))?;
        let multiplier = 2f64.powi(exponent);
        if !multiplier.is_finite() {
            return Err(FrequencyError::OctaveOverflow(octave_shift));
        }

        let period_seconds = period_days * SECONDS_PER_DAY;
        let base_hz = 1.0 / period_seconds;
        let audible_hz = base_hz * multiplier;
        // subnormal periods overflow 1/T, huge ones overflow T itself
        let in_range = |v: f64| v.is_finite() && v > 0.0;
        if !(in_range(period_seconds) && in_range(base_hz) && in_range(audible_hz)) {
            return Err(FrequencyError::FrequencyOutOfRange {
                period_days,
                octave_shift,
                audible_hz,
            });
        }

        Ok(Self {
            period_days,
            period_seconds,
            base_hz,
            octave_shift,
            multiplier,
            audible_hz,
        })
    }

    /// Signed distance in Hz between the derived frequency and a reference pitch
    pub fn deviation_from(&self, reference_hz: f64) -> f64 {
        self.audible_hz - reference_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polaris_regression() {
        let hz = derive_frequency(3.97, 26).unwrap();
        assert!((hz - 195.64).abs() < 0.01, "got {hz}");
    }

    #[test]
    fn test_intermediate_values() {
        let d = FrequencyDerivation::compute(3.97, 26).unwrap();
        assert!((d.period_seconds - 343_008.0).abs() < 1e-6);
        assert_eq!(d.multiplier, 67_108_864.0);
        assert!((d.base_hz - 2.915_384e-6).abs() < 1e-11);
        assert!((d.deviation_from(196.0) + 0.352).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_periods_are_rejected() {
        for period in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = derive_frequency(period, 26).unwrap_err();
            assert!(matches!(err, FrequencyError::InvalidPeriod(_)));
        }
    }

    #[test]
    fn test_monotonic_in_period_and_octave() {
        let periods = [0.5, 1.0, 3.97, 10.0, 365.25];
        for n in 0..30 {
            let values: Vec<f64> = periods
                .iter()
                .map(|&p| derive_frequency(p, n).unwrap())
                .collect();
            assert!(values.windows(2).all(|w| w[0] > w[1]));

            let here = derive_frequency(3.97, n).unwrap();
            let next = derive_frequency(3.97, n + 1).unwrap();
            assert!((next / here - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_extreme_periods_are_out_of_range() {
        // 1/T overflows to infinity
        let err = derive_frequency(1e-320, 26).unwrap_err();
        assert!(matches!(
            err,
            FrequencyError::FrequencyOutOfRange { audible_hz, .. } if audible_hz.is_infinite()
        ));

        // T overflows, so the frequency collapses to zero
        let err = derive_frequency(1e306, 0).unwrap_err();
        assert!(matches!(
            err,
            FrequencyError::FrequencyOutOfRange { octave_shift: 0, .. }
        ));

        // a finite period times a huge multiplier overflows as well
        assert!(matches!(
            derive_frequency(1e-300, 1000),
            Err(FrequencyError::FrequencyOutOfRange { .. })
        ));
    }

    #[test]
    fn test_octave_overflow() {
        assert_eq!(
            derive_frequency(1.0, 5000),
            Err(FrequencyError::OctaveOverflow(5000))
        );
    }
}
