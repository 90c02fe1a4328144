//! JSON wire format for mass functions.
//!
//! Only focal, non-Omega entries are written; Omega is implied by the rest.
//! Import goes back through `add_entry`, so a hand-edited file is held to
//! the same invariants as code that builds a mass function directly.

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::Result;
use crate::mass::MassFunction;
use crate::selector::Selector;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WireMassFunction {
    pub domain: Domain,
    #[serde(default)]
    pub masses: Vec<WireMass>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WireMass {
    pub entry: Vec<String>,
    pub mass: f64,
}

impl WireMassFunction {
    pub fn from_mass_function(m: &MassFunction) -> Self {
        let omega = m.domain().omega();
        let masses = m
            .focal_elements()
            .filter(|(entry, _)| *entry != omega)
            .map(|(entry, mass)| WireMass {
                entry: m.domain().symbols_of(entry).map(String::from).collect(),
                mass,
            })
            .collect();
        Self {
            domain: m.domain().clone(),
            masses,
        }
    }

    /// Rebuild and re-validate the mass function.
    pub fn into_mass_function(self) -> Result<MassFunction> {
        let mut m = MassFunction::new(self.domain);
        for wire in self.masses {
            m.add_entry(Selector::Subset(wire.entry), wire.mass)?;
        }
        Ok(m)
    }
}

/// Serialize a mass function to pretty JSON.
pub fn export_json(m: &MassFunction) -> Result<String> {
    let wire = WireMassFunction::from_mass_function(m);
    Ok(serde_json::to_string_pretty(&wire)?)
}

/// Parse and validate a mass function from JSON.
pub fn import_json(json: &str) -> Result<MassFunction> {
    let wire: WireMassFunction = serde_json::from_str(json)?;
    wire.into_mass_function()
}
