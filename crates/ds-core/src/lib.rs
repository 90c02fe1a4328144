//! Dempster-Shafer evidence engine.
//!
//! A `MassFunction` assigns mass to subsets of a finite `Domain` and derives
//! belief, plausibility and doubt from it. `accumulate` merges two independent
//! mass functions with Dempster's rule, renormalizing away conflicting mass.
//!
//! Zero I/O: pure math with no opinions about where evidence comes from.

pub mod combine;
pub mod constants;
pub mod domain;
pub mod error;
pub mod mass;
pub mod selector;
pub mod serde_compat;

pub use combine::{accumulate, accumulate_all, accumulate_tree};
pub use constants::{MAX_DOMAIN_SIZE, OMEGA, TOLERANCE};
pub use domain::{Domain, Entry};
pub use error::{EvidenceError, Result};
pub use mass::MassFunction;
pub use selector::Selector;
pub use serde_compat::{WireMass, WireMassFunction, export_json, import_json};
