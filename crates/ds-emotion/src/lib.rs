//! Emotion estimation from voice features.
//!
//! Reads per-step speed, pitch and intensity measurements, bins them, and
//! slides a window over the recording. Each window yields four independent
//! evidence sources over six emotions, which are combined with Dempster's
//! rule from `ds-core`. Belief, plausibility and doubt per emotion are
//! written to a result file.

pub mod analysis;
pub mod config;
pub mod discretize;
pub mod error;
pub mod evidence;
pub mod results;
pub mod sample;
pub mod window;

pub use analysis::{AnalysisReport, Metric, ResultRow, analyze, analyze_file, window_evidence};
pub use config::{AnalysisConfig, DeviationBounds, Thresholds};
pub use discretize::{Level, LevelRow, discretize};
pub use error::{AnalysisError, Result};
pub use evidence::{Emotion, WindowEvidence, emotion_domain};
pub use results::{OutputFormat, to_csv, write_report};
pub use sample::{Feature, Sample, parse_samples, read_samples};
pub use window::{Distribution, intensity_deviation, sample_std, windows};
