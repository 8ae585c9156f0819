// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Waveform preview images
//!
//! A preview is a best-effort by-product: the pipeline logs a warning when
//! rendering fails and carries on with the audio artifact.

use std::path::Path;

use anyhow::{anyhow, Result};
use log::debug;
use plotters::prelude::*;

/// Trace color of the waveform
const ROYAL_PURPLE: RGBColor = RGBColor(0x8A, 0x2B, 0xE2);

/// Something able to turn a slice of samples into an image file
pub trait WaveformPreview {
    /// Render `samples` (captured at `sample_rate`) to `path`
    fn render(&self, samples: &[f64], sample_rate: u32, path: &Path) -> Result<()>;
}

/// Line plot of the waveform rendered with plotters' bitmap backend
#[derive(Debug, Clone, Copy)]
pub struct PlotPreview {
    pub width: u32,
    pub height: u32,
}

impl Default for PlotPreview {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 400,
        }
    }
}

impl WaveformPreview for PlotPreview {
    fn render(&self, samples: &[f64], sample_rate: u32, path: &Path) -> Result<()> {
        if samples.is_empty() || sample_rate == 0 {
            return Err(anyhow!("Nothing to plot: empty waveform slice"));
        }
        debug!("Plotting {} samples to {:?}", samples.len(), path);

        let step = 1.0 / sample_rate as f64;
        let x_max = samples.len() as f64 * step;
        let y_max = samples
            .iter()
            .fold(0.0, |peak: f64, s| peak.max(s.abs()))
            .max(1e-6)
            * 1.1;

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| anyhow!("Failed to prepare preview canvas: {}", e))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(0.0..x_max, -y_max..y_max)
            .map_err(|e| anyhow!("Failed to build preview chart: {}", e))?;

        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, 0.0), (x_max, 0.0)],
                BLACK.mix(0.3),
            )))
            .map_err(|e| anyhow!("Failed to draw preview axis: {}", e))?;

        chart
            .draw_series(LineSeries::new(
                samples
                    .iter()
                    .enumerate()
                    .map(|(i, &s)| (i as f64 * step, s)),
                &ROYAL_PURPLE,
            ))
            .map_err(|e| anyhow!("Failed to draw waveform: {}", e))?;

        root.present()
            .map_err(|e| anyhow!("Failed to save preview to {:?}: {}", path, e))?;
        Ok(())
    }
}
