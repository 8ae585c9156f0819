// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Floating-point sample buffers

use super::ProcessingError;

/// One or two parallel channels of floating-point samples
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    /// A single carrier, later duplicated into both output channels
    Mono(Vec<f64>),
    /// Two independent carriers of equal length
    Dual { left: Vec<f64>, right: Vec<f64> },
}

impl SampleBuffer {
    /// Pack two independent channels, rejecting mismatched lengths
    pub fn dual(left: Vec<f64>, right: Vec<f64>) -> Result<Self, ProcessingError> {
        if left.len() != right.len() {
            return Err(ProcessingError::LengthMismatch {
                expected: left.len(),
                actual: right.len(),
            });
        }
        Ok(Self::Dual { left, right })
    }

    /// Samples per channel
    pub fn len(&self) -> usize {
        match self {
            Self::Mono(samples) => samples.len(),
            Self::Dual { left, .. } => left.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channel_count(&self) -> usize {
        match self {
            Self::Mono(_) => 1,
            Self::Dual { .. } => 2,
        }
    }

    /// Borrow every channel
    pub fn channels(&self) -> Vec<&[f64]> {
        match self {
            Self::Mono(samples) => vec![samples.as_slice()],
            Self::Dual { left, right } => vec![left.as_slice(), right.as_slice()],
        }
    }

    /// Apply the same fallible transform to every channel
    pub fn try_map<F, E>(self, f: F) -> Result<Self, E>
    where
        F: Fn(Vec<f64>) -> Result<Vec<f64>, E>,
    {
        Ok(match self {
            Self::Mono(samples) => Self::Mono(f(samples)?),
            Self::Dual { left, right } => Self::Dual {
                left: f(left)?,
                right: f(right)?,
            },
        })
    }

    /// Apply the same infallible transform to every channel
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(Vec<f64>) -> Vec<f64>,
    {
        match self {
            Self::Mono(samples) => Self::Mono(f(samples)),
            Self::Dual { left, right } => Self::Dual {
                left: f(left),
                right: f(right),
            },
        }
    }

    /// Mono is duplicated to both sides, dual channels become left/right
    pub fn into_stereo(self) -> StereoBuffer {
        match self {
            Self::Mono(samples) => StereoBuffer::from_mono(samples),
            Self::Dual { left, right } => StereoBuffer { left, right },
        }
    }
}

/// Left/right channel pair of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct StereoBuffer {
    left: Vec<f64>,
    right: Vec<f64>,
}

impl StereoBuffer {
    pub fn new(left: Vec<f64>, right: Vec<f64>) -> Result<Self, ProcessingError> {
        if left.len() != right.len() {
            return Err(ProcessingError::LengthMismatch {
                expected: left.len(),
                actual: right.len(),
            });
        }
        Ok(Self { left, right })
    }

    /// Duplicate a mono channel into both sides
    pub fn from_mono(samples: Vec<f64>) -> Self {
        Self {
            right: samples.clone(),
            left: samples,
        }
    }

    pub fn left(&self) -> &[f64] {
        &self.left
    }

    pub fn right(&self) -> &[f64] {
        &self.right
    }

    /// Frames (samples per channel)
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Largest absolute sample over both channels
    pub fn peak(&self) -> f64 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0, |peak: f64, s| peak.max(s.abs()))
    }
}
