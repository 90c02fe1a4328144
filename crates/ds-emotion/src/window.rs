//! Sliding-window statistics over discretized and raw samples.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::DeviationBounds;
use crate::discretize::{Level, LevelRow};
use crate::sample::{Feature, Sample};

/// Row ranges of every full window, step 1. Empty when there are fewer rows
/// than `size`.
pub fn windows(len: usize, size: usize) -> impl Iterator<Item = Range<usize>> {
    let count = if size == 0 || len < size {
        0
    } else {
        len - size + 1
    };
    (0..count).map(move |start| start..start + size)
}

/// Fraction of a window's rows in each bin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Distribution {
    pub low: f64,
    pub normal: f64,
    pub high: f64,
}

impl Distribution {
    pub fn of(rows: &[LevelRow], feature: Feature) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let mut counts = [0usize; 3];
        for row in rows {
            let slot = match row.get(feature) {
                Level::Low => 0,
                Level::Normal => 1,
                Level::High => 2,
            };
            counts[slot] += 1;
        }
        let n = rows.len() as f64;
        Self {
            low: counts[0] as f64 / n,
            normal: counts[1] as f64 / n,
            high: counts[2] as f64 / n,
        }
    }
}

/// Sample standard deviation (n - 1 denominator). `None` below two values.
pub fn sample_std(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let values: Vec<f64> = values.into_iter().collect();
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(var.sqrt())
}

/// How strongly the intensity fluctuates in a window, min-max normalized
/// against global bounds and clamped into [0, 1].
pub fn intensity_deviation(window: &[Sample], bounds: DeviationBounds) -> f64 {
    let Some(std) = sample_std(window.iter().map(|s| s.intensity)) else {
        return 0.0;
    };
    let normalized = (std - bounds.min) / (bounds.max - bounds.min);
    if !(0.0..=1.0).contains(&normalized) {
        tracing::warn!(
            "intensity deviation {std:.3} outside [{}, {}], clamping",
            bounds.min,
            bounds.max
        );
    }
    normalized.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::config::AnalysisConfig;
    use crate::discretize::discretize;

    fn sample(intensity: f64) -> Sample {
        Sample {
            speed: 90.0,
            pitch: 150.0,
            intensity,
        }
    }

    #[test]
    fn test_window_count() {
        assert_eq!(windows(12, 10).count(), 3);
        assert_eq!(windows(10, 10).collect::<Vec<_>>(), vec![0..10]);
        assert_eq!(windows(9, 10).count(), 0);
        assert_eq!(windows(5, 0).count(), 0);
        assert_eq!(windows(12, 10).last(), Some(2..12));
    }

    #[test]
    fn test_distribution_fractions() {
        let config = AnalysisConfig::default();
        // intensity: low, low, normal, high
        let samples: Vec<Sample> = [20.0, 28.0, 40.0, 55.0].map(sample).to_vec();
        let rows = discretize(&samples, &config);
        let dist = Distribution::of(&rows, Feature::Intensity);
        assert_abs_diff_eq!(dist.low, 0.5);
        assert_abs_diff_eq!(dist.normal, 0.25);
        assert_abs_diff_eq!(dist.high, 0.25);
        assert_abs_diff_eq!(dist.low + dist.normal + dist.high, 1.0);
    }

    #[test]
    fn test_sample_std() {
        assert_eq!(sample_std([1.0]), None);
        // mean 5, squared deviations sum 32, n - 1 = 7
        let std = sample_std([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_abs_diff_eq!(std, (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_intensity_deviation_normalized() {
        let bounds = DeviationBounds { min: 0.0, max: 10.0 };
        // std of [0, 10] is sqrt(50)
        let window = [sample(0.0), sample(10.0)];
        assert_abs_diff_eq!(
            intensity_deviation(&window, bounds),
            50f64.sqrt() / 10.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_intensity_deviation_clamped() {
        let bounds = DeviationBounds::default();
        let flat = [sample(30.0), sample(30.0), sample(30.0)];
        assert_eq!(intensity_deviation(&flat, bounds), 0.0);
        let wild = [sample(0.0), sample(100.0)];
        assert_eq!(intensity_deviation(&wild, bounds), 1.0);
    }
}
