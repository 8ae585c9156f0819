// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # WAV Artifact Writer
//!
//! Writes 16-bit PCM WAV files with `hound`. The file is first written to a
//! temporary file in the destination directory and then renamed over the
//! final path, so a failed write never leaves a truncated artifact behind.
//!
//! ## Examples
//!
//! ```no_run
//! use stellar_tone::output::WavArtifactWriter;
//! use stellar_tone::postprocessing::PcmBuffer;
//!
//! let pcm = PcmBuffer::new(1, vec![0, 16383, 0, -16383]).unwrap();
//! let writer = WavArtifactWriter::new(44100);
//! writer.write("tone.wav", &pcm).unwrap();
//! ```

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::postprocessing::PcmBuffer;

/// Bit depth of every written artifact
pub const BITS_PER_SAMPLE: u16 = 16;

/// Frequency label with two decimals, truncated rather than rounded
/// (195.648 Hz is labelled `195.64`).
pub fn frequency_label(frequency_hz: f64) -> String {
    // the epsilon keeps 8.2 * 100 = 819.999... from dropping a cent
    let cents = (frequency_hz * 100.0 + 1e-6).trunc();
    format!("{:.2}", cents / 100.0)
}

/// File name of an audio artifact, labelled with its frequency.
///
/// ```
/// use stellar_tone::output::artifact_file_name;
/// assert_eq!(artifact_file_name("Polaris_Pure", 195.648), "Polaris_Pure_195.64Hz.wav");
/// ```
pub fn artifact_file_name(stem: &str, frequency_hz: f64) -> String {
    format!("{}_{}Hz.wav", stem, frequency_label(frequency_hz))
}

/// File name of the waveform preview matching an artifact
pub fn preview_file_name(stem: &str, frequency_hz: f64) -> String {
    format!("{}_{}Hz_preview.png", stem, frequency_label(frequency_hz))
}

/// Writes [`PcmBuffer`]s as RIFF/WAVE PCM files
#[derive(Debug, Clone, Copy)]
pub struct WavArtifactWriter {
    sample_rate: u32,
}

impl WavArtifactWriter {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// WAV header description for a buffer
    pub fn spec_for(&self, pcm: &PcmBuffer) -> WavSpec {
        WavSpec {
            channels: pcm.channels(),
            sample_rate: self.sample_rate,
            bits_per_sample: BITS_PER_SAMPLE,
            sample_format: SampleFormat::Int,
        }
    }

    /// Write `pcm` to `path` atomically and return the final path.
    ///
    /// Parent directories are created when missing. Any I/O or encoding
    /// failure is returned with context and the destination is left untouched.
    pub fn write<P: AsRef<Path>>(&self, path: P, pcm: &PcmBuffer) -> Result<PathBuf> {
        let path = path.as_ref();
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !directory.exists() {
            debug!("Creating output directory: {:?}", directory);
            std::fs::create_dir_all(&directory).with_context(|| {
                format!("Failed to create output directory at {:?}", directory)
            })?;
        }

        let temp = NamedTempFile::new_in(&directory).with_context(|| {
            format!("Failed to create temporary file in {:?}", directory)
        })?;
        debug!("Writing {} frames to temporary file {:?}", pcm.frames(), temp.path());

        {
            let mut writer = WavWriter::new(BufWriter::new(temp.as_file()), self.spec_for(pcm))
                .context("Failed to start WAV stream")?;
            for &sample in pcm.samples() {
                writer
                    .write_sample(sample)
                    .context("Failed to write WAV sample")?;
            }
            writer.finalize().context("Failed to finalize WAV file")?;
        }

        temp.persist(path)
            .with_context(|| format!("Failed to move WAV file into place at {:?}", path))?;

        info!(
            "Audio file saved: {} ({} Hz, {} channel(s), {} frames)",
            path.display(),
            self.sample_rate,
            pcm.channels(),
            pcm.frames()
        );
        Ok(path.to_path_buf())
    }
}
