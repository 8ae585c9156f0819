// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Joint peak normalization

use log::debug;

use super::{ProcessingError, SampleBuffer};

/// Largest absolute sample across all channels of the buffer
pub fn peak_amplitude(buffer: &SampleBuffer) -> f64 {
    buffer
        .channels()
        .into_iter()
        .flatten()
        .fold(0.0, |peak: f64, s| peak.max(s.abs()))
}

/// Scale every channel by the same factor so the joint peak equals `headroom`.
///
/// Each sample becomes `sample / peak * headroom`. Channels are never
/// normalized independently, which keeps the binaural balance intact.
///
/// # Errors
///
/// * [`ProcessingError::InvalidHeadroom`] when `headroom` is outside (0, 1]
/// * [`ProcessingError::SilentBuffer`] when the peak is zero or not finite
pub fn normalize(buffer: SampleBuffer, headroom: f64) -> Result<SampleBuffer, ProcessingError> {
    if !(headroom > 0.0 && headroom <= 1.0) {
        return Err(ProcessingError::InvalidHeadroom(headroom));
    }

    let peak = peak_amplitude(&buffer);
    if peak == 0.0 || !peak.is_finite() {
        return Err(ProcessingError::SilentBuffer(peak));
    }
    // NaN samples are skipped by f64::max, so check them separately
    if buffer.channels().iter().any(|c| c.iter().any(|s| s.is_nan())) {
        return Err(ProcessingError::SilentBuffer(f64::NAN));
    }

    debug!("Normalizing peak {:.6} to headroom {}", peak, headroom);
    Ok(buffer.map(|channel| {
        channel
            .into_iter()
            .map(|s| (s / peak) * headroom)
            .collect()
    }))
}
