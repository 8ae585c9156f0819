// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Signal synthesis module
//!
//! This module generates the raw material of every artifact: the sample
//! time grid, the sine carriers (mono or binaural) and the low-frequency
//! amplitude envelopes used for the breathing effect.

pub mod envelope;
pub mod time_grid;
pub mod tone;

pub use envelope::{generate_lfo, Envelope, EnvelopeError, Lfo};
pub use time_grid::TimeGrid;
pub use tone::{synthesize, synthesize_binaural, BinauralPair};
