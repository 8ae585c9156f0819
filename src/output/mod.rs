// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Artifact output module
//!
//! Persists rendered audio as PCM WAV files and, optionally, a PNG preview
//! of the beginning of the waveform.

pub mod preview;
pub mod wav;

pub use preview::{PlotPreview, WaveformPreview};
pub use wav::{artifact_file_name, frequency_label, preview_file_name, WavArtifactWriter};
