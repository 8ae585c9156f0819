// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Artifact output and report configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::synthesis::Session;

/// Where and how artifacts are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the WAV file and its preview
    #[serde(default = "default_directory")]
    pub directory: String,

    /// File name prefix; the frequency label and extension are appended
    pub file_stem: String,

    /// Render a PNG preview of the beginning of the waveform
    #[serde(default = "default_preview")]
    pub preview: bool,

    /// Length of the previewed slice in seconds
    #[serde(default = "default_preview_seconds")]
    pub preview_seconds: f64,
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_preview() -> bool {
    true
}

fn default_preview_seconds() -> f64 {
    0.1 // about twenty periods of a G3
}

impl OutputConfig {
    pub fn for_session(session: Session) -> Self {
        Self {
            directory: default_directory(),
            file_stem: session.file_stem().to_string(),
            preview: default_preview(),
            preview_seconds: default_preview_seconds(),
        }
    }

    pub fn directory_path(&self) -> PathBuf {
        PathBuf::from(&self.directory)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::for_session(Session::Pure)
    }
}

/// Musical pitch the derived frequency is compared against in reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceConfig {
    pub pitch_hz: f64,
    pub pitch_name: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            pitch_hz: 196.0,
            pitch_name: "G3".to_string(),
        }
    }
}
