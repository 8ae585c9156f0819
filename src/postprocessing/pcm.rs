// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! 16-bit PCM quantization

use super::{ProcessingError, StereoBuffer};

/// Scale factor between a unit float sample and 16-bit PCM
pub const PCM_FULL_SCALE: f64 = 32767.0;

/// Quantize one sample: `trunc(sample * 32767)`, saturating at ±32767.
///
/// Truncation toward zero (not rounding) is the pinned behavior: `0.8`
/// becomes `26213`, not `26214`. Out-of-range inputs never reach `-32768`,
/// and NaN maps to 0.
pub fn quantize_sample(sample: f64) -> i16 {
    (sample * PCM_FULL_SCALE).clamp(-PCM_FULL_SCALE, PCM_FULL_SCALE) as i16
}

/// Interleaved 16-bit PCM samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    channels: u16,
    samples: Vec<i16>,
}

impl PcmBuffer {
    /// Wrap interleaved mono or stereo samples; the length must be a multiple of `channels`
    pub fn new(channels: u16, samples: Vec<i16>) -> Result<Self, ProcessingError> {
        if !(1..=2).contains(&channels) {
            return Err(ProcessingError::InvalidChannelCount(channels));
        }
        let width = usize::from(channels);
        if samples.len() % width != 0 {
            return Err(ProcessingError::LengthMismatch {
                expected: samples.len().next_multiple_of(width),
                actual: samples.len(),
            });
        }
        Ok(Self { channels, samples })
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Interleaved samples (`L, R, L, R, ...` for stereo)
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels)
    }

    /// Samples of one channel, de-interleaved
    pub fn channel(&self, index: usize) -> impl Iterator<Item = i16> + '_ {
        self.samples
            .iter()
            .skip(index)
            .step_by(usize::from(self.channels))
            .copied()
    }
}

/// Quantize a stereo buffer into interleaved 16-bit PCM
pub fn quantize(buffer: &StereoBuffer) -> PcmBuffer {
    let mut samples = Vec::with_capacity(buffer.len() * 2);
    for (&left, &right) in buffer.left().iter().zip(buffer.right()) {
        samples.push(quantize_sample(left));
        samples.push(quantize_sample(right));
    }
    PcmBuffer {
        channels: 2,
        samples,
    }
}
