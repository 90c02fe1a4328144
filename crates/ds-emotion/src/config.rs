//! Analysis settings, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) gives the
//! quartile borders and window length the pipeline was calibrated with.
//!
//! ```toml
//! window_size = 10
//! delimiter = ";"
//!
//! [speed]
//! lower = 82.5
//! upper = 110.5
//!
//! [deviation]
//! min = 0.95
//! max = 19.3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Inclusive borders between the low, normal and high bins of one feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub lower: f64,
    pub upper: f64,
}

/// Global range used to min-max normalize the intensity deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for DeviationBounds {
    fn default() -> Self {
        Self {
            min: 0.95,
            max: 19.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rows per sliding window.
    pub window_size: usize,
    /// Field separator of the input CSV.
    pub delimiter: char,
    pub speed: Thresholds,
    pub pitch: Thresholds,
    pub intensity: Thresholds,
    pub deviation: DeviationBounds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: 10,
            delimiter: ';',
            speed: Thresholds {
                lower: 82.5,
                upper: 110.5,
            },
            pitch: Thresholds {
                lower: 140.0,
                upper: 265.0,
            },
            intensity: Thresholds {
                lower: 28.0,
                upper: 49.0,
            },
            deviation: DeviationBounds::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("loaded analysis config from {}", path.display());
        Ok(config)
    }

    /// `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        // The deviation needs a sample standard deviation, so at least two rows.
        if self.window_size < 2 {
            return Err(AnalysisError::InvalidConfig(format!(
                "window_size must be at least 2, got {}",
                self.window_size
            )));
        }
        for (name, t) in [
            ("speed", self.speed),
            ("pitch", self.pitch),
            ("intensity", self.intensity),
        ] {
            if !(t.lower < t.upper) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{name}: lower border {} must be below upper border {}",
                    t.lower, t.upper
                )));
            }
        }
        if !(self.deviation.min < self.deviation.max) {
            return Err(AnalysisError::InvalidConfig(format!(
                "deviation: min {} must be below max {}",
                self.deviation.min, self.deviation.max
            )));
        }
        Ok(())
    }
}
