use thiserror::Error;

/// Validation and combination failures. All of them are raised at the point
/// of violation and never corrected silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvidenceError {
    /// Input cannot be normalized to a set of unique, known symbols.
    #[error("cannot convert to a set of unique symbols: {0}")]
    SetConversion(String),

    #[error("no selector given")]
    EmptySelector,

    #[error("Omega is maintained automatically and cannot be assigned")]
    OmegaAssignment,

    #[error("entry {entry} already holds mass {current}")]
    DuplicateAssignment { entry: String, current: f64 },

    #[error("mass {value} for entry {entry} is outside [0, 1]")]
    OutOfRange { entry: String, value: f64 },

    /// The non-Omega masses would sum past 1 and drive Omega negative.
    #[error("assigning {value} to {entry} raises the assigned total to {total}")]
    ExcessMass { entry: String, value: f64, total: f64 },

    #[error("cannot accumulate mass functions over different domains: {left} vs {right}")]
    DomainMismatch { left: String, right: String },

    #[error("total conflict between sources (conflict mass {conflict}), normalization undefined")]
    FullConflict { conflict: f64 },

    #[error("no evidence sources to accumulate")]
    NoSources,

    #[error("invalid mass function JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for EvidenceError {
    fn from(e: serde_json::Error) -> Self {
        EvidenceError::Json(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EvidenceError>;
