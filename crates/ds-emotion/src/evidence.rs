//! Turning one window's voice statistics into evidence about emotions.
//!
//! Each feature is an independent source. Its high and low ratios become
//! masses on the groups of emotions that feature points to; whatever is
//! left stays on Omega as ignorance.

use std::fmt;
use std::sync::Arc;

use ds_core::{Domain, MassFunction, Result, accumulate_all};
use serde::{Deserialize, Serialize};

use crate::window::Distribution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Fear,
    Surprise,
    Anger,
    Joy,
    Disgust,
    Sadness,
}

use self::Emotion::{Anger, Disgust, Fear, Joy, Sadness, Surprise};

impl Emotion {
    pub const ALL: [Emotion; 6] = [Fear, Surprise, Anger, Joy, Disgust, Sadness];

    pub fn name(self) -> &'static str {
        match self {
            Fear => "fear",
            Surprise => "surprise",
            Anger => "anger",
            Joy => "joy",
            Disgust => "disgust",
            Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six-emotion hypothesis domain.
pub fn emotion_domain() -> Result<Arc<Domain>> {
    Ok(Arc::new(Domain::new(Emotion::ALL.map(Emotion::name))?))
}

fn names(group: &[Emotion]) -> Vec<String> {
    group.iter().map(|e| e.name().to_string()).collect()
}

/// Emotion groups each feature bin supports.
const SPEED_HIGH: &[Emotion] = &[Fear, Surprise, Anger, Joy];
const SPEED_LOW: &[Emotion] = &[Joy, Disgust];
const PITCH_HIGH: &[Emotion] = &[Fear, Surprise, Anger, Joy];
const PITCH_LOW: &[Emotion] = &[Disgust, Sadness];
const INTENSITY_HIGH: &[Emotion] = &[Surprise, Anger, Joy];
const INTENSITY_LOW: &[Emotion] = &[Sadness];
const DEVIATION: &[Emotion] = &[Sadness];

/// Everything measured in one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowEvidence {
    pub speed: Distribution,
    pub pitch: Distribution,
    pub intensity: Distribution,
    /// Normalized intensity deviation in [0, 1].
    pub deviation: f64,
}

impl WindowEvidence {
    /// One mass function per source: speed, pitch, intensity, deviation.
    pub fn sources(&self, domain: &Arc<Domain>) -> Result<[MassFunction; 4]> {
        let binned = |dist: Distribution, high: &[Emotion], low: &[Emotion]| -> Result<MassFunction> {
            let mut m = MassFunction::new(Arc::clone(domain));
            m.add_entry(names(high), dist.high)?;
            m.add_entry(names(low), dist.low)?;
            Ok(m)
        };

        let speed = binned(self.speed, SPEED_HIGH, SPEED_LOW)?;
        let pitch = binned(self.pitch, PITCH_HIGH, PITCH_LOW)?;
        let intensity = binned(self.intensity, INTENSITY_HIGH, INTENSITY_LOW)?;

        let mut deviation = MassFunction::new(Arc::clone(domain));
        deviation.add_entry(names(DEVIATION), self.deviation)?;

        Ok([speed, pitch, intensity, deviation])
    }

    /// Fold all four sources with Dempster's rule.
    pub fn combine(&self, domain: &Arc<Domain>) -> Result<MassFunction> {
        let sources = self.sources(domain)?;
        accumulate_all(&sources)
    }
}
