// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Envelope application and anti-click fades

use crate::synthesis::Envelope;

use super::ProcessingError;

/// Multiply a channel sample by sample with an envelope of the same length
pub fn apply_envelope(
    mut channel: Vec<f64>,
    envelope: &Envelope,
) -> Result<Vec<f64>, ProcessingError> {
    if channel.len() != envelope.len() {
        return Err(ProcessingError::LengthMismatch {
            expected: channel.len(),
            actual: envelope.len(),
        });
    }
    for (sample, level) in channel.iter_mut().zip(envelope.levels()) {
        *sample *= level;
    }
    Ok(channel)
}

/// Number of samples covered by a fade of `fade_seconds`, truncated
pub fn fade_samples(fade_seconds: f64, sample_rate: u32) -> Result<usize, ProcessingError> {
    if !fade_seconds.is_finite() || fade_seconds < 0.0 {
        return Err(ProcessingError::InvalidFade(fade_seconds));
    }
    Ok((fade_seconds * sample_rate as f64) as usize)
}

/// Linear ramp of `len` points from 0 to 1, both ends included.
///
/// A single-point ramp is `[0.0]`.
pub fn fade_ramp(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = 1.0 / (len - 1) as f64;
            let mut ramp: Vec<f64> = (0..len).map(|i| i as f64 * step).collect();
            ramp[len - 1] = 1.0;
            ramp
        }
    }
}

/// Apply a linear fade-in to the head and the mirrored fade-out to the tail.
///
/// Sample `i` of the head is scaled by `ramp[i]`, sample `len - 1 - j` of the
/// tail by `ramp[j]`. When the fade covers more than half of the channel the
/// two regions overlap and their gains multiply. A fade longer than the whole
/// channel keeps its slope: only the first `len` ramp points are used on each
/// side, so the channel never reaches full gain.
pub fn apply_fade(
    mut channel: Vec<f64>,
    fade_seconds: f64,
    sample_rate: u32,
) -> Result<Vec<f64>, ProcessingError> {
    let ramp = fade_ramp(fade_samples(fade_seconds, sample_rate)?);
    let len = channel.len();
    let span = ramp.len().min(len);

    for (sample, gain) in channel.iter_mut().zip(&ramp[..span]) {
        *sample *= gain;
    }
    for (sample, gain) in channel.iter_mut().rev().zip(&ramp[..span]) {
        *sample *= gain;
    }

    Ok(channel)
}
