// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use std::path::Path;
use std::sync::Once;
use stellar_tone::config::{Config, Session};
use stellar_tone::output::WaveformPreview;
use stellar_tone::pipeline::{render, run};
use stellar_tone::postprocessing::ProcessingError;
use stellar_tone::report::{LogReporter, MemoryReporter, NullReporter};
use tempfile::tempdir;

static INIT: Once = Once::new();

// Setup logger for tests
fn setup() {
    INIT.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .init();
    });
}

/// Preview that always fails, standing in for a broken plotting backend
struct BrokenPreview;

impl WaveformPreview for BrokenPreview {
    fn render(&self, _samples: &[f64], _sample_rate: u32, _path: &Path) -> Result<()> {
        Err(anyhow::anyhow!("no display backend"))
    }
}

/// Preview that records the slice it was given
struct SlicePreview {
    seen: std::cell::RefCell<Vec<f64>>,
}

impl WaveformPreview for SlicePreview {
    fn render(&self, samples: &[f64], _sample_rate: u32, path: &Path) -> Result<()> {
        self.seen.borrow_mut().extend_from_slice(samples);
        std::fs::write(path, b"preview")?;
        Ok(())
    }
}

fn one_second(session: Session) -> Config {
    let mut config = Config::for_session(session);
    config.synthesis.duration_seconds = 1.0;
    config.synthesis.fade_seconds = 0.25;
    config
}

#[test]
fn test_end_to_end_pure_tone() -> Result<()> {
    setup();
    let config = one_second(Session::Pure);
    let audio = render(&config, &mut NullReporter)?;

    assert!((audio.frequency_hz - 195.64).abs() < 0.01);
    assert_eq!(audio.stereo.len(), 44100);
    assert_eq!(audio.stereo.left(), audio.stereo.right());
    assert!(audio.stereo.left().iter().all(|s| s.is_finite()));
    assert!(audio.stereo.peak() <= config.synthesis.headroom);
    assert!((audio.stereo.peak() - 0.8).abs() < 1e-12);

    assert_eq!(audio.pcm.channels(), 2);
    assert_eq!(audio.pcm.frames(), 44100);
    assert!(audio.pcm.samples().iter().all(|s| s.unsigned_abs() <= 32767));
    Ok(())
}

#[test]
fn test_render_through_log_reporter() -> Result<()> {
    setup();
    let logged = render(&one_second(Session::Breath), &mut LogReporter)?;
    let silent = render(&one_second(Session::Breath), &mut NullReporter)?;
    assert_eq!(logged.pcm, silent.pcm);
    Ok(())
}

#[test]
fn test_end_to_end_binaural() -> Result<()> {
    setup();
    let mut config = one_second(Session::Breath);
    config.synthesis.frequency_hz = Some(195.64);
    let audio = render(&config, &mut NullReporter)?;

    let pair = audio.binaural.expect("binaural pair");
    assert_eq!(pair.left_hz(), 195.64);
    assert!((pair.right_hz() - 201.14).abs() < 1e-9);
    assert!(audio.derivation.is_none());
    assert_ne!(audio.stereo.left(), audio.stereo.right());
    assert!((audio.stereo.peak() - 0.9).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_fades_silence_both_ends() -> Result<()> {
    let audio = render(&one_second(Session::Breath), &mut NullReporter)?;
    let pcm = audio.pcm.samples();
    assert_eq!(&pcm[..2], &[0, 0]);
    assert_eq!(&pcm[pcm.len() - 2..], &[0, 0]);
    Ok(())
}

#[test]
fn test_runs_are_byte_identical() -> Result<()> {
    setup();
    let dir_a = tempdir()?;
    let dir_b = tempdir()?;

    let mut config = one_second(Session::Breath);
    config.output.preview = false;

    config.output.directory = dir_a.path().to_string_lossy().to_string();
    let first = run(&config, &mut NullReporter, None)?;
    config.output.directory = dir_b.path().to_string_lossy().to_string();
    let second = run(&config, &mut NullReporter, None)?;

    assert_eq!(
        first.wav_path.file_name(),
        second.wav_path.file_name()
    );
    assert_eq!(std::fs::read(&first.wav_path)?, std::fs::read(&second.wav_path)?);
    Ok(())
}

#[test]
fn test_written_file_matches_rendered_pcm() -> Result<()> {
    let dir = tempdir()?;
    let mut config = one_second(Session::Pure);
    config.output.directory = dir.path().to_string_lossy().to_string();

    let outcome = run(&config, &mut NullReporter, None)?;
    assert_eq!(
        outcome.wav_path,
        dir.path().join("Polaris_Pure_195.64Hz.wav")
    );
    assert!(outcome.preview_path.is_none());

    let mut reader = hound::WavReader::open(&outcome.wav_path)?;
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.spec().sample_rate, 44100);
    assert_eq!(reader.spec().bits_per_sample, 16);
    let samples: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>()?;
    assert_eq!(samples, outcome.audio.pcm.samples());
    Ok(())
}

#[test]
fn test_preview_failure_is_not_fatal() -> Result<()> {
    setup();
    let dir = tempdir()?;
    let mut config = one_second(Session::Pure);
    config.output.directory = dir.path().to_string_lossy().to_string();

    let mut sink = MemoryReporter::new();
    let with_failure = run(&config, &mut sink, Some(&BrokenPreview))?;
    assert!(with_failure.wav_path.exists());
    assert!(with_failure.preview_path.is_none());
    assert!(sink.contains("Visualization skipped: no display backend"));

    // the audio is the same with or without a working preview
    let without = render(&config, &mut NullReporter)?;
    assert_eq!(with_failure.audio.pcm, without.pcm);
    Ok(())
}

#[test]
fn test_preview_receives_leading_slice() -> Result<()> {
    let dir = tempdir()?;
    let mut config = one_second(Session::Pure);
    config.output.directory = dir.path().to_string_lossy().to_string();

    let preview = SlicePreview {
        seen: std::cell::RefCell::new(Vec::new()),
    };
    let outcome = run(&config, &mut NullReporter, Some(&preview))?;

    let seen = preview.seen.borrow();
    assert_eq!(seen.len(), 4410);
    assert_eq!(&seen[..], &outcome.audio.stereo.left()[..4410]);
    assert_eq!(
        outcome.preview_path,
        Some(dir.path().join("Polaris_Pure_195.64Hz_preview.png"))
    );
    Ok(())
}

#[test]
fn test_silent_render_is_a_domain_error() {
    let mut config = one_second(Session::Pure);
    // a render this short lies entirely under the fades
    config.synthesis.duration_seconds = 2.0 / 44100.0;
    let err = render(&config, &mut NullReporter).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProcessingError>(),
        Some(ProcessingError::SilentBuffer(_))
    ));
}

#[test]
fn test_write_failure_is_fatal() -> Result<()> {
    let dir = tempdir()?;
    let blocker = dir.path().join("not_a_directory");
    std::fs::write(&blocker, b"x")?;

    let mut config = one_second(Session::Pure);
    config.output.directory = blocker.to_string_lossy().to_string();
    assert!(run(&config, &mut NullReporter, None).is_err());
    Ok(())
}
