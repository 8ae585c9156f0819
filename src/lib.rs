// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Stellar tone library
//!
//! Sonification of a Cepheid pulsation period: the period of the star is
//! shifted up by whole octaves into the audible range and rendered as a pure
//! breathing tone or a binaural beat, then written as a 16-bit PCM WAV file.
//!
//! Intended for digital art and sound meditation; the output is neither
//! astronomical observation data nor a medical device.

pub mod config;
pub mod frequency;
pub mod output;
pub mod pipeline;
pub mod postprocessing;
pub mod report;
pub mod synthesis;
