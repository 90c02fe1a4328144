//! Acoustic measurements, one row per time step.
//!
//! Input is a delimited text file with a header naming the three voice
//! features. The header may use the German column names of the recording
//! tool or English aliases, in any order; extra columns are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Speed,
    Pitch,
    Intensity,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Speed, Feature::Pitch, Feature::Intensity];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Speed => "speed",
            Feature::Pitch => "pitch",
            Feature::Intensity => "intensity",
        }
    }

    /// Header names accepted for this feature, compared case-insensitively.
    fn column_names(self) -> &'static [&'static str] {
        match self {
            Feature::Speed => &["geschwindigkeit", "speed"],
            Feature::Pitch => &["tonlage", "pitch"],
            Feature::Intensity => &["schallstaerke", "schallstärke", "intensity"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub speed: f64,
    pub pitch: f64,
    pub intensity: f64,
}

impl Sample {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Speed => self.speed,
            Feature::Pitch => self.pitch,
            Feature::Intensity => self.intensity,
        }
    }
}

/// Column index of each feature, in `Feature::ALL` order.
struct ColumnMap([usize; 3]);

impl ColumnMap {
    fn from_header(header: &str, delimiter: char) -> Result<Self> {
        let names: Vec<String> = header
            .trim_start_matches('\u{feff}')
            .split(delimiter)
            .map(|s| s.trim().trim_matches('"').to_lowercase())
            .collect();

        let mut columns = [0; 3];
        for (slot, feature) in columns.iter_mut().zip(Feature::ALL) {
            *slot = names
                .iter()
                .position(|name| feature.column_names().contains(&name.as_str()))
                .ok_or(AnalysisError::MissingColumn(feature.name()))?;
        }
        Ok(Self(columns))
    }
}

/// Parse samples from delimited text. Blank lines are skipped; line numbers
/// in errors are 1-based and count every line of the input.
pub fn parse_samples(text: &str, delimiter: char) -> Result<Vec<Sample>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(AnalysisError::Parse {
            line: 1,
            message: "input is empty, expected a header row".into(),
        });
    };
    let columns = ColumnMap::from_header(header, delimiter)?;

    let mut samples = Vec::new();
    for (line, row) in lines {
        let fields: Vec<&str> = row.split(delimiter).map(str::trim).collect();
        let mut values = [0.0; 3];
        for ((value, &col), feature) in values.iter_mut().zip(&columns.0).zip(Feature::ALL) {
            let field = fields.get(col).ok_or_else(|| AnalysisError::Parse {
                line,
                message: format!("missing {} field", feature.name()),
            })?;
            *value = field.parse::<f64>().map_err(|e| AnalysisError::Parse {
                line,
                message: format!("{} value '{field}': {e}", feature.name()),
            })?;
            // `f64::from_str` accepts "NaN" and "inf".
            if !value.is_finite() {
                return Err(AnalysisError::Parse {
                    line,
                    message: format!("{} value '{field}' is not a finite number", feature.name()),
                });
            }
        }
        let [speed, pitch, intensity] = values;
        samples.push(Sample {
            speed,
            pitch,
            intensity,
        });
    }
    Ok(samples)
}

pub fn read_samples(path: &Path, delimiter: char) -> Result<Vec<Sample>> {
    let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
    let samples = parse_samples(&text, delimiter)?;
    tracing::debug!("read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}
