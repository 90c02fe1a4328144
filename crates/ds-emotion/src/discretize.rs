use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, Thresholds};
use crate::sample::{Feature, Sample};

/// Coarse bin of one feature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Normal,
    High,
}

impl Thresholds {
    /// `value <= lower` is low, `value >= upper` is high, anything between is normal.
    pub fn classify(&self, value: f64) -> Level {
        if value <= self.lower {
            Level::Low
        } else if value >= self.upper {
            Level::High
        } else {
            Level::Normal
        }
    }
}

/// Levels of one sample, indexed like `Feature::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRow([Level; 3]);

impl LevelRow {
    pub fn get(&self, feature: Feature) -> Level {
        self.0[feature as usize]
    }
}

impl AnalysisConfig {
    pub fn thresholds(&self, feature: Feature) -> Thresholds {
        match feature {
            Feature::Speed => self.speed,
            Feature::Pitch => self.pitch,
            Feature::Intensity => self.intensity,
        }
    }
}

pub fn discretize(samples: &[Sample], config: &AnalysisConfig) -> Vec<LevelRow> {
    samples
        .iter()
        .map(|sample| {
            LevelRow(Feature::ALL.map(|feature| config.thresholds(feature).classify(sample.get(feature))))
        })
        .collect()
}
