// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Synthesis Pipeline
//!
//! Composes the stages into a complete run:
//!
//! ```text
//! period ──► frequency ──► carriers ──► envelope ──► fade ──► normalize ──► PCM ──► WAV
//!                                                                   └──► preview (best effort)
//! ```
//!
//! [`render`] produces the audio in memory and is fully deterministic: the
//! same configuration always yields the same samples. [`run`] additionally
//! writes the WAV artifact and the optional preview.
//!
//! ## Examples
//!
//! ```no_run
//! use stellar_tone::config::{Config, Session};
//! use stellar_tone::output::PlotPreview;
//! use stellar_tone::pipeline::run;
//! use stellar_tone::report::ConsoleReporter;
//!
//! let config = Config::for_session(Session::Breath);
//! let outcome = run(&config, &mut ConsoleReporter, Some(&PlotPreview::default())).unwrap();
//! println!("{}", outcome.wav_path.display());
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::config::{validate_specific_rules, Config, SynthesisConfig};
use crate::frequency::{FrequencyDerivation, FrequencyError};
use crate::output::{artifact_file_name, preview_file_name, WavArtifactWriter, WaveformPreview};
use crate::postprocessing::{PcmBuffer, PostProcessor, SampleBuffer, StereoBuffer};
use crate::report::{report_derivation, ReportSink};
use crate::synthesis::{synthesize, BinauralPair, TimeGrid};

/// Audio rendered in memory by [`render`]
#[derive(Debug, Clone)]
pub struct RenderedAudio {
    /// Derivation details, absent when the carrier was set explicitly
    pub derivation: Option<FrequencyDerivation>,
    /// Carrier frequency of the left (or only) channel
    pub frequency_hz: f64,
    /// Binaural carrier pair when a beat was requested
    pub binaural: Option<BinauralPair>,
    pub sample_rate: u32,
    /// Normalized floating-point samples
    pub stereo: StereoBuffer,
    /// Quantized interleaved samples
    pub pcm: PcmBuffer,
}

/// Files produced by [`run`]
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub audio: RenderedAudio,
    pub wav_path: PathBuf,
    /// Set only when a preview was requested and rendered successfully
    pub preview_path: Option<PathBuf>,
}

/// Carrier frequency of a run: the explicit override, or the derived one
pub fn carrier_frequency(
    synthesis: &SynthesisConfig,
) -> Result<(f64, Option<FrequencyDerivation>), FrequencyError> {
    match synthesis.frequency_hz {
        Some(freq) if freq.is_finite() && freq > 0.0 => Ok((freq, None)),
        Some(freq) => Err(FrequencyError::InvalidFrequency(freq)),
        None => {
            let derivation = FrequencyDerivation::compute(
                synthesis.pulsation_period_days,
                synthesis.octave_shift,
            )?;
            Ok((derivation.audible_hz, Some(derivation)))
        }
    }
}

/// Render the configured artifact in memory.
///
/// The configuration is checked with [`validate_specific_rules`] first, so a
/// hand-built [`Config`] gets the same guarantees as one loaded from a file.
///
/// # Errors
///
/// Fails on a configuration rejected by the validation rules (invalid period
/// or carrier, carrier above Nyquist, envelope levels outside [0, 1], bad fade
/// or headroom), an empty time grid, or a buffer that cannot be normalized.
pub fn render(config: &Config, sink: &mut dyn ReportSink) -> Result<RenderedAudio> {
    validate_specific_rules(config)?;
    let synthesis = &config.synthesis;

    let (frequency_hz, derivation) =
        carrier_frequency(synthesis).context("Failed to determine the carrier frequency")?;
    match &derivation {
        Some(derivation) => report_derivation(
            sink,
            derivation,
            Some((config.reference.pitch_hz, config.reference.pitch_name.as_str())),
        ),
        None => sink.report(&format!(
            "Carrier frequency set explicitly: {:.2} Hz",
            frequency_hz
        )),
    }

    let grid = TimeGrid::new(synthesis.sample_rate, synthesis.duration_seconds);
    if grid.is_empty() {
        anyhow::bail!(
            "A duration of {} s at {} Hz yields no samples",
            synthesis.duration_seconds,
            synthesis.sample_rate
        );
    }
    debug!(
        "Time grid: {} samples at {} Hz",
        grid.len(),
        grid.sample_rate()
    );

    let (buffer, binaural) = if synthesis.is_binaural() {
        let pair = BinauralPair::new(frequency_hz, synthesis.binaural_beat_hz);
        sink.report(&format!(
            "Binaural carriers: left {:.2} Hz, right {:.2} Hz ({} Hz beat)",
            pair.left_hz(),
            pair.right_hz(),
            pair.beat_hz()
        ));
        let (left, right) = pair.synthesize(&grid);
        (SampleBuffer::dual(left, right)?, Some(pair))
    } else {
        sink.report(&format!("Generating pure sine wave at {:.2} Hz", frequency_hz));
        (SampleBuffer::Mono(synthesize(&grid, frequency_hz)), None)
    };

    let lfo = synthesis
        .lfo()
        .context("Invalid breathing envelope configuration")?;
    sink.report(&format!(
        "Breathing envelope: {:.3} Hz between {:.0}% and {:.0}%",
        lfo.rate_hz,
        lfo.min_level * 100.0,
        lfo.max_level * 100.0
    ));
    let envelope = lfo.generate(&grid)?;

    let processor = PostProcessor::new(
        synthesis.sample_rate,
        synthesis.fade_seconds,
        synthesis.headroom,
    );
    let (stereo, pcm) = processor
        .process_to_pcm(buffer, &envelope)
        .context("Failed to post-process the synthesized signal")?;

    Ok(RenderedAudio {
        derivation,
        frequency_hz,
        binaural,
        sample_rate: synthesis.sample_rate,
        stereo,
        pcm,
    })
}

/// Render the artifact, write it to disk, then try to render its preview.
///
/// Preview failures are logged and reported but never fail the run. WAV
/// write failures are fatal.
pub fn run(
    config: &Config,
    sink: &mut dyn ReportSink,
    preview: Option<&dyn WaveformPreview>,
) -> Result<RunOutcome> {
    let audio = render(config, sink)?;

    let directory = config.output.directory_path();
    let wav_path = directory.join(artifact_file_name(
        &config.output.file_stem,
        audio.frequency_hz,
    ));
    let wav_path = WavArtifactWriter::new(audio.sample_rate)
        .write(&wav_path, &audio.pcm)
        .context("Failed to write the audio artifact")?;
    sink.report(&format!("[SUCCESS] Audio file saved: {}", wav_path.display()));

    let preview_path = match preview {
        Some(preview) if config.output.preview => {
            let path = directory.join(preview_file_name(
                &config.output.file_stem,
                audio.frequency_hz,
            ));
            let count = ((config.output.preview_seconds * audio.sample_rate as f64) as usize)
                .min(audio.stereo.len());
            match preview.render(&audio.stereo.left()[..count], audio.sample_rate, &path) {
                Ok(()) => {
                    sink.report(&format!(
                        "[SUCCESS] Waveform preview saved: {}",
                        path.display()
                    ));
                    Some(path)
                }
                Err(err) => {
                    warn!("Waveform preview failed: {:#}", err);
                    sink.report(&format!("Visualization skipped: {}", err));
                    None
                }
            }
        }
        _ => None,
    };

    Ok(RunOutcome {
        audio,
        wav_path,
        preview_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Session;
    use crate::report::{MemoryReporter, NullReporter};

    fn short_config(session: Session) -> Config {
        let mut config = Config::for_session(session);
        config.synthesis.duration_seconds = 1.0;
        config.synthesis.fade_seconds = 0.1;
        config
    }

    #[test]
    fn test_carrier_override() {
        let mut synthesis = SynthesisConfig::default();
        synthesis.frequency_hz = Some(195.64);
        assert_eq!(carrier_frequency(&synthesis).unwrap(), (195.64, None));

        synthesis.frequency_hz = Some(-1.0);
        assert_eq!(
            carrier_frequency(&synthesis),
            Err(FrequencyError::InvalidFrequency(-1.0))
        );
    }

    #[test]
    fn test_render_reports_progress() {
        let mut sink = MemoryReporter::new();
        let audio = render(&short_config(Session::Breath), &mut sink).unwrap();
        assert!(audio.derivation.is_some());
        assert!(sink.contains("195.65 Hz"));
        assert!(sink.contains("right 201.15 Hz"));
        assert!(sink.contains("Breathing envelope: 0.125 Hz between 40% and 100%"));
    }

    #[test]
    fn test_empty_grid_is_an_error() {
        let mut config = short_config(Session::Pure);
        config.synthesis.duration_seconds = 1e-9;
        assert!(render(&config, &mut NullReporter).is_err());
    }

    #[test]
    fn test_render_validates_hand_built_config() {
        let mut config = short_config(Session::Pure);
        config.synthesis.frequency_hz = Some(30_000.0);
        let err = render(&config, &mut NullReporter).unwrap_err();
        assert!(err.to_string().contains("Nyquist"), "got {err}");

        let mut config = short_config(Session::Breath);
        config.synthesis.envelope_max = 1.5;
        let err = render(&config, &mut NullReporter).unwrap_err();
        assert!(err.to_string().contains("envelope range"), "got {err}");
    }

    #[test]
    fn test_extreme_period_is_rejected_before_rendering() {
        let mut config = short_config(Session::Pure);
        config.synthesis.pulsation_period_days = 1e-320;
        let err = render(&config, &mut NullReporter).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FrequencyError>(),
            Some(FrequencyError::FrequencyOutOfRange { .. })
        ));
    }

    #[test]
    fn test_invalid_period_is_reported_as_domain_error() {
        let mut config = short_config(Session::Pure);
        config.synthesis.pulsation_period_days = -3.97;
        let err = render(&config, &mut NullReporter).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FrequencyError>(),
            Some(&FrequencyError::InvalidPeriod(-3.97))
        );
    }
}
