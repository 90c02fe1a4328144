//! Full pipeline for one recording: discretize, slide windows, build and
//! combine evidence, and read belief, plausibility and doubt per emotion.

use std::fmt;
use std::path::Path;

use ds_core::{EvidenceError, MassFunction};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::discretize::discretize;
use crate::error::Result;
use crate::evidence::{Emotion, WindowEvidence, emotion_domain};
use crate::sample::{Feature, Sample, read_samples};
use crate::window::{Distribution, intensity_deviation, windows};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Plausibility,
    Belief,
    Doubt,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Plausibility, Metric::Belief, Metric::Doubt];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Plausibility => "plausibility",
            Metric::Belief => "belief",
            Metric::Doubt => "doubt",
        }
    }

    fn read(self, m: &MassFunction, emotion: Emotion) -> ds_core::Result<f64> {
        match self {
            Metric::Plausibility => m.get_plausibility(emotion.name()),
            Metric::Belief => m.get_belief(emotion.name()),
            Metric::Doubt => m.get_doubt(emotion.name()),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One output triple for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub window: usize,
    pub metric: Metric,
    pub emotion: Emotion,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Name of the analyzed recording.
    pub source: String,
    pub samples: usize,
    /// Windows examined, skipped ones included.
    pub windows: usize,
    /// Windows whose sources were in total conflict.
    pub skipped: Vec<usize>,
    pub rows: Vec<ResultRow>,
}

impl AnalysisReport {
    pub fn value(&self, window: usize, metric: Metric, emotion: Emotion) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.window == window && r.metric == metric && r.emotion == emotion)
            .map(|r| r.value)
    }
}

/// Per-window evidence for a recording, in window order.
pub fn window_evidence(samples: &[Sample], config: &AnalysisConfig) -> Vec<WindowEvidence> {
    let levels = discretize(samples, config);
    windows(samples.len(), config.window_size)
        .map(|range| {
            let rows = &levels[range.clone()];
            WindowEvidence {
                speed: Distribution::of(rows, Feature::Speed),
                pitch: Distribution::of(rows, Feature::Pitch),
                intensity: Distribution::of(rows, Feature::Intensity),
                deviation: intensity_deviation(&samples[range], config.deviation),
            }
        })
        .collect()
}

fn window_rows(window: usize, combined: &MassFunction) -> ds_core::Result<Vec<ResultRow>> {
    let mut rows = Vec::with_capacity(Emotion::ALL.len() * Metric::ALL.len());
    for emotion in Emotion::ALL {
        for metric in Metric::ALL {
            rows.push(ResultRow {
                window,
                metric,
                emotion,
                value: metric.read(combined, emotion)?,
            });
        }
    }
    Ok(rows)
}

/// Analyze in-memory samples. A window in total conflict is skipped and
/// logged; any other evidence error aborts the run.
pub fn analyze(source: &str, samples: &[Sample], config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;
    let domain = emotion_domain()?;
    let evidence = window_evidence(samples, config);

    let mut report = AnalysisReport {
        source: source.to_string(),
        samples: samples.len(),
        windows: evidence.len(),
        skipped: Vec::new(),
        rows: Vec::new(),
    };

    for (window, ev) in evidence.iter().enumerate() {
        match ev.combine(&domain) {
            Ok(combined) => report.rows.extend(window_rows(window, &combined)?),
            Err(EvidenceError::FullConflict { conflict }) => {
                tracing::warn!("{source}: window {window} in total conflict ({conflict:.6}), skipped");
                report.skipped.push(window);
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        "{source}: {} samples, {} windows, {} skipped",
        report.samples,
        report.windows,
        report.skipped.len()
    );
    Ok(report)
}

/// Read a recording from disk and analyze it. The report is named after the
/// file name.
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let samples = read_samples(path, config.delimiter)?;
    let source = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    analyze(source, &samples, config)
}
