// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Signal post-processing module
//!
//! Turns raw carriers into a stereo buffer ready to be written:
//!
//! 1. envelope application
//! 2. linear fade-in / fade-out
//! 3. joint peak normalization with headroom
//! 4. stereo packing (mono is duplicated)
//! 5. 16-bit PCM quantization
//!
//! Every stage takes its buffer by value and returns the transformed buffer,
//! so a run is a left-to-right composition of stages over one owned buffer.

pub mod buffer;
pub mod normalize;
pub mod pcm;
pub mod shaping;

pub use buffer::{SampleBuffer, StereoBuffer};
pub use normalize::{normalize, peak_amplitude};
pub use pcm::{quantize, quantize_sample, PcmBuffer, PCM_FULL_SCALE};
pub use shaping::{apply_envelope, apply_fade, fade_ramp, fade_samples};

use log::debug;
use thiserror::Error;

use crate::synthesis::Envelope;

/// Errors raised by the post-processing stages
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("Buffer length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Cannot normalize silence: peak amplitude is {0}")]
    SilentBuffer(f64),
    #[error("Headroom must be in (0, 1], got {0}")]
    InvalidHeadroom(f64),
    #[error("Fade duration must be a finite non-negative number of seconds, got {0}")]
    InvalidFade(f64),
    #[error("PCM buffers hold 1 or 2 channels, got {0}")]
    InvalidChannelCount(u16),
}

/// Parameters shared by every post-processing stage of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostProcessor {
    pub sample_rate: u32,
    pub fade_seconds: f64,
    pub headroom: f64,
}

impl PostProcessor {
    pub fn new(sample_rate: u32, fade_seconds: f64, headroom: f64) -> Self {
        Self {
            sample_rate,
            fade_seconds,
            headroom,
        }
    }

    /// Run envelope, fade, normalization and stereo packing in order.
    ///
    /// The same envelope is applied to every channel. The returned buffer is
    /// normalized so that its joint peak equals the headroom.
    pub fn process(
        &self,
        buffer: SampleBuffer,
        envelope: &Envelope,
    ) -> Result<StereoBuffer, ProcessingError> {
        debug!(
            "Post-processing {} channel(s) of {} samples",
            buffer.channel_count(),
            buffer.len()
        );

        let buffer = buffer.try_map(|channel| apply_envelope(channel, envelope))?;
        let buffer =
            buffer.try_map(|channel| apply_fade(channel, self.fade_seconds, self.sample_rate))?;
        let buffer = normalize(buffer, self.headroom)?;

        Ok(buffer.into_stereo())
    }

    /// Run [`process`](Self::process) then quantize to PCM
    pub fn process_to_pcm(
        &self,
        buffer: SampleBuffer,
        envelope: &Envelope,
    ) -> Result<(StereoBuffer, PcmBuffer), ProcessingError> {
        let stereo = self.process(buffer, envelope)?;
        let pcm = quantize(&stereo);
        Ok((stereo, pcm))
    }
}
