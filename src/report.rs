// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Progress reporting
//!
//! The synthesis core never prints directly. It hands human-readable lines to
//! a [`ReportSink`], so the binaries can print them, the library can route
//! them through `log`, and the tests can inspect them.

use log::info;

use crate::frequency::{nearest_note, FrequencyDerivation};

/// Destination for free-form progress messages
pub trait ReportSink {
    /// Record one message
    fn report(&mut self, message: &str);
}

/// Forwards every message to `log::info!`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ReportSink for LogReporter {
    fn report(&mut self, message: &str) {
        info!("{}", message);
    }
}

/// Prints every message to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ReportSink for ConsoleReporter {
    fn report(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Keeps every message in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    messages: Vec<String>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// True if any recorded message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl ReportSink for MemoryReporter {
    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Discards every message
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl ReportSink for NullReporter {
    fn report(&mut self, _message: &str) {}
}

/// Report the full period-to-frequency calculation.
///
/// `reference` is an optional `(pitch_hz, pitch_name)` the derived frequency
/// is compared against.
pub fn report_derivation(
    sink: &mut dyn ReportSink,
    derivation: &FrequencyDerivation,
    reference: Option<(f64, &str)>,
) {
    sink.report(&format!(
        "Physical period (T): {} days = {} seconds",
        derivation.period_days, derivation.period_seconds
    ));
    sink.report(&format!(
        "Base oscillation frequency: {:.10} Hz (inaudible infrasound)",
        derivation.base_hz
    ));
    sink.report(&format!(
        "Octave shift n={}: amplification factor {}",
        derivation.octave_shift, derivation.multiplier
    ));
    sink.report(&format!(
        "Pulsation acoustic frequency: {:.2} Hz",
        derivation.audible_hz
    ));

    if let Some((pitch_hz, pitch_name)) = reference {
        sink.report(&format!(
            "Pitch comparison: {} ({:.2} Hz), deviation {:.2} Hz",
            pitch_name,
            pitch_hz,
            derivation.deviation_from(pitch_hz)
        ));
    }
    if let Some(note) = nearest_note(derivation.audible_hz) {
        sink.report(&format!("Nearest equal-tempered note: {}", note));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_collects() {
        let mut sink = MemoryReporter::new();
        sink.report("one");
        sink.report("two");
        assert_eq!(sink.messages(), &["one".to_string(), "two".to_string()]);
        assert!(sink.contains("tw"));
        assert!(!sink.contains("three"));
    }

    #[test]
    fn test_report_derivation_lines() {
        let derivation = FrequencyDerivation::compute(3.97, 26).unwrap();
        let mut sink = MemoryReporter::new();
        report_derivation(&mut sink, &derivation, Some((196.0, "G3")));

        assert!(sink.contains("3.97 days = 343008 seconds"));
        assert!(sink.contains("0.0000029154 Hz"));
        assert!(sink.contains("amplification factor 67108864"));
        assert!(sink.contains("195.65 Hz"));
        assert!(sink.contains("deviation -0.35 Hz"));
        assert!(sink.contains("Nearest equal-tempered note: G3"));
    }

    #[test]
    fn test_report_without_reference() {
        let derivation = FrequencyDerivation::compute(1.0, 20).unwrap();
        let mut sink = MemoryReporter::new();
        report_derivation(&mut sink, &derivation, None);
        assert!(!sink.contains("Pitch comparison"));
        assert_eq!(sink.messages().len(), 5);
    }
}
