use std::fmt;
use std::sync::Arc;

use crate::constants::TOLERANCE;
use crate::domain::{Domain, Entry};
use crate::error::{EvidenceError, Result};
use crate::selector::Selector;

/// Basic probability assignment over the power set of one domain.
///
/// Every non-empty subset has a slot, indexed by its mask. Omega starts at 1
/// and is never written by callers: after each assignment it is reset to
/// `1 - assigned`, where `assigned` is the running sum of all other masses.
/// Masses therefore always sum to 1.
#[derive(Clone, Debug)]
pub struct MassFunction {
    domain: Arc<Domain>,
    masses: Vec<f64>,
    assigned: f64,
}

impl MassFunction {
    /// Vacuous mass function: Omega = 1, everything else 0.
    pub fn new(domain: impl Into<Arc<Domain>>) -> Self {
        let domain = domain.into();
        let mut masses = vec![0.0; domain.table_len()];
        masses[domain.omega().index()] = 1.0;
        Self {
            domain,
            masses,
            assigned: 0.0,
        }
    }

    /// Build the domain from raw symbols, then the vacuous mass function.
    pub fn over<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(Domain::new(symbols)?))
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub(crate) fn shared_domain(&self) -> Arc<Domain> {
        Arc::clone(&self.domain)
    }

    /// Assign `value` to the entry named by `target`.
    ///
    /// Fails when the target is Omega, when the entry already holds non-zero
    /// mass, when `value` is outside [0, 1], or when the assigned total would
    /// pass 1. Only the target and Omega change.
    pub fn add_entry(&mut self, target: impl Into<Selector>, value: f64) -> Result<()> {
        let entry = target.into().resolve(&self.domain)?;
        self.assign(entry, value)
    }

    /// `add_entry` for an already resolved entry.
    pub fn assign(&mut self, entry: Entry, value: f64) -> Result<()> {
        if !self.domain.contains_entry(entry) {
            return Err(EvidenceError::SetConversion(format!(
                "mask {:#b} is not a subset of domain {}",
                entry.mask(),
                self.domain
            )));
        }
        if entry == self.domain.omega() {
            return Err(EvidenceError::OmegaAssignment);
        }

        let current = self.masses[entry.index()];
        if current != 0.0 {
            return Err(EvidenceError::DuplicateAssignment {
                entry: self.domain.describe(entry),
                current,
            });
        }
        if !(-TOLERANCE..=1.0 + TOLERANCE).contains(&value) {
            return Err(EvidenceError::OutOfRange {
                entry: self.domain.describe(entry),
                value,
            });
        }
        let total = self.assigned + value;
        if total > 1.0 + TOLERANCE {
            return Err(EvidenceError::ExcessMass {
                entry: self.domain.describe(entry),
                value,
                total,
            });
        }

        // Values inside the tolerance band are stored snapped into [0, 1].
        let value = value.clamp(0.0, 1.0);
        self.masses[entry.index()] = value;
        self.assigned += value;
        self.masses[self.domain.omega().index()] = (1.0 - self.assigned).max(0.0);
        Ok(())
    }

    /// Raw mass of one entry.
    pub fn get_measure(&self, target: impl Into<Selector>) -> Result<f64> {
        let entry = target.into().resolve(&self.domain)?;
        Ok(self.mass_of(entry))
    }

    pub fn mass_of(&self, entry: Entry) -> f64 {
        self.masses.get(entry.index()).copied().unwrap_or(0.0)
    }

    /// Sum of the masses of every entry contained in the target.
    pub fn get_belief(&self, target: impl Into<Selector>) -> Result<f64> {
        let entry = target.into().resolve(&self.domain)?;
        Ok(self.belief_of(Some(entry)))
    }

    /// Sum of the masses of every entry that intersects the target.
    pub fn get_plausibility(&self, target: impl Into<Selector>) -> Result<f64> {
        let entry = target.into().resolve(&self.domain)?;
        Ok(self.plausibility_of(entry))
    }

    /// Belief in the complement of the target.
    pub fn get_doubt(&self, target: impl Into<Selector>) -> Result<f64> {
        let entry = target.into().resolve(&self.domain)?;
        Ok(self.belief_of(self.domain.complement(entry)))
    }

    /// Width of the belief interval: plausibility - belief.
    pub fn get_ignorance(&self, target: impl Into<Selector>) -> Result<f64> {
        let entry = target.into().resolve(&self.domain)?;
        Ok(self.plausibility_of(entry) - self.belief_of(Some(entry)))
    }

    /// Belief of a possibly empty target. The empty set has belief 0.
    pub fn belief_of(&self, target: Option<Entry>) -> f64 {
        let Some(target) = target else {
            return 0.0;
        };
        // Walk the submasks of target in descending order.
        let full = target.mask() & self.domain.full_mask();
        let mut sub = full;
        let mut sum = 0.0;
        while sub != 0 {
            sum += self.masses[sub as usize];
            sub = (sub - 1) & full;
        }
        sum
    }

    pub fn plausibility_of(&self, target: Entry) -> f64 {
        self.get_measures()
            .filter(|(entry, _)| entry.intersects(target))
            .map(|(_, mass)| mass)
            .sum()
    }

    /// Every non-empty subset with its mass, in ascending mask order.
    pub fn get_measures(&self) -> impl Iterator<Item = (Entry, f64)> + '_ {
        self.domain
            .entries()
            .map(move |entry| (entry, self.masses[entry.index()]))
    }

    /// Entries with non-zero mass, Omega included when it has any left.
    pub fn focal_elements(&self) -> impl Iterator<Item = (Entry, f64)> + '_ {
        self.get_measures().filter(|(_, mass)| *mass != 0.0)
    }

    /// Union of all focal elements. `None` only if every mass is zero,
    /// which the conservation invariant rules out.
    pub fn core(&self) -> Option<Entry> {
        self.focal_elements()
            .map(|(entry, _)| entry)
            .reduce(Entry::union)
    }

    pub fn total_mass(&self) -> f64 {
        self.masses.iter().sum()
    }

    /// True when nothing but Omega carries mass.
    pub fn is_vacuous(&self) -> bool {
        self.focal_elements()
            .all(|(entry, _)| entry == self.domain.omega())
    }

    /// Entry-by-entry comparison within `tolerance`. Different domains are never equal.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.domain == other.domain
            && self
                .masses
                .iter()
                .zip(&other.masses)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl fmt::Display for MassFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let omega = self.domain.omega();
        for (entry, mass) in self.focal_elements() {
            if entry == omega {
                writeln!(f, "Omega: {mass:.6}")?;
            } else {
                writeln!(f, "{}: {mass:.6}", self.domain.describe(entry))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn abc() -> MassFunction {
        MassFunction::over(["a", "b", "c"]).unwrap()
    }

    #[test]
    fn test_new_is_vacuous() {
        let m = abc();
        assert_eq!(m.get_measures().count(), 7);
        assert_eq!(m.get_measure("Omega").unwrap(), 1.0);
        assert!(m.is_vacuous());
        assert_eq!(m.core(), Some(m.domain().omega()));
    }

    #[test]
    fn test_scalar_domain() {
        let mut m = MassFunction::new(Domain::from("a"));
        assert_eq!(m.get_measure("a").unwrap(), 1.0);
        assert_eq!(m.get_belief("Omega").unwrap(), 1.0);
        assert!(matches!(
            m.add_entry("a", 0.5),
            Err(EvidenceError::OmegaAssignment)
        ));
    }

    #[test]
    fn test_over_rejects_duplicates() {
        assert!(matches!(
            MassFunction::over(["a", "a"]),
            Err(EvidenceError::SetConversion(_))
        ));
    }

    #[test]
    fn test_add_entry_updates_omega() {
        let mut m = abc();
        m.add_entry(["a", "c"], 0.8).unwrap();
        assert_abs_diff_eq!(m.get_measure("Omega").unwrap(), 0.2, epsilon = TOLERANCE);
        assert_abs_diff_eq!(m.get_measure(["c", "a"]).unwrap(), 0.8, epsilon = TOLERANCE);

        m.add_entry("b", 0.15).unwrap();
        assert_abs_diff_eq!(m.get_measure("Omega").unwrap(), 0.05, epsilon = TOLERANCE);
        assert_abs_diff_eq!(m.total_mass(), 1.0, epsilon = TOLERANCE);
        assert!(!m.is_vacuous());
    }

    #[test]
    fn test_omega_assignment_rejected() {
        let mut m = abc();
        assert_eq!(m.add_entry("Omega", 0.5), Err(EvidenceError::OmegaAssignment));
        assert_eq!(
            m.add_entry(["a", "b", "c"], 0.5),
            Err(EvidenceError::OmegaAssignment)
        );
        assert_eq!(m.get_measure("Omega").unwrap(), 1.0);
    }

    #[test]
    fn test_duplicate_assignment_rejected_in_any_order() {
        let mut m = abc();
        m.add_entry(["a", "c"], 0.3).unwrap();
        assert!(matches!(
            m.add_entry(["a", "c"], 0.1),
            Err(EvidenceError::DuplicateAssignment { .. })
        ));
        assert!(matches!(
            m.add_entry(["c", "a"], 0.1),
            Err(EvidenceError::DuplicateAssignment { .. })
        ));
        assert_abs_diff_eq!(m.get_measure("Omega").unwrap(), 0.7, epsilon = TOLERANCE);
    }

    #[test]
    fn test_zero_assignment_leaves_entry_open() {
        let mut m = abc();
        m.add_entry("a", 0.0).unwrap();
        m.add_entry("a", 0.4).unwrap();
        assert_abs_diff_eq!(m.get_measure("a").unwrap(), 0.4, epsilon = TOLERANCE);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut m = abc();
        for bad in [-0.1, 1.1, f64::NAN] {
            assert!(matches!(
                m.add_entry("a", bad),
                Err(EvidenceError::OutOfRange { .. })
            ));
        }
        // Within tolerance of the boundary is accepted.
        m.add_entry("a", 1.0 + 1e-9).unwrap();
    }

    #[test]
    fn test_tolerance_band_values_stored_in_range() {
        let mut m = abc();
        m.add_entry("a", -5e-8).unwrap();
        assert_eq!(m.get_measure("a").unwrap(), 0.0);
        assert_eq!(m.get_measure("Omega").unwrap(), 1.0);

        m.add_entry("b", 1.0 + 5e-8).unwrap();
        assert_eq!(m.get_measure("b").unwrap(), 1.0);
        assert_eq!(m.get_measure("Omega").unwrap(), 0.0);
        for (_, mass) in m.get_measures() {
            assert!((0.0..=1.0).contains(&mass), "mass {mass} outside [0, 1]");
        }
    }

    #[test]
    fn test_excess_mass_rejected() {
        let mut m = abc();
        m.add_entry("a", 0.7).unwrap();
        assert!(matches!(
            m.add_entry("b", 0.5),
            Err(EvidenceError::ExcessMass { .. })
        ));
        assert_abs_diff_eq!(m.get_measure("Omega").unwrap(), 0.3, epsilon = TOLERANCE);
    }

    #[test]
    fn test_empty_selector() {
        let m = abc();
        let none: [&str; 0] = [];
        assert_eq!(m.get_belief(none), Err(EvidenceError::EmptySelector));
        assert_eq!(m.get_measure(none), Err(EvidenceError::EmptySelector));
    }

    #[test]
    fn test_belief_plausibility_doubt() {
        let mut m = abc();
        m.add_entry(["a", "c"], 0.8).unwrap();

        assert_abs_diff_eq!(m.get_belief("Omega").unwrap(), 1.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(m.get_belief(["a", "c"]).unwrap(), 0.8, epsilon = TOLERANCE);
        assert_abs_diff_eq!(m.get_belief("a").unwrap(), 0.0, epsilon = TOLERANCE);

        assert_abs_diff_eq!(m.get_plausibility("Omega").unwrap(), 1.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(m.get_plausibility("a").unwrap(), 1.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(m.get_plausibility("b").unwrap(), 0.2, epsilon = TOLERANCE);

        // doubt(b) = belief({a, c})
        assert_abs_diff_eq!(m.get_doubt("b").unwrap(), 0.8, epsilon = TOLERANCE);
        assert_abs_diff_eq!(m.get_doubt("Omega").unwrap(), 0.0, epsilon = TOLERANCE);

        assert_abs_diff_eq!(m.get_ignorance("b").unwrap(), 0.2, epsilon = TOLERANCE);
    }

    #[test]
    fn test_focal_elements_and_core() {
        let mut m = abc();
        m.add_entry("a", 0.25).unwrap();
        m.add_entry("b", 0.75).unwrap();
        let focal: Vec<Entry> = m.focal_elements().map(|(e, _)| e).collect();
        // Omega is exhausted and drops out of the focal set.
        assert_eq!(focal.len(), 2);
        assert_eq!(m.core(), Some(m.domain().entry(["a", "b"]).unwrap()));
    }

    #[test]
    fn test_assign_rejects_foreign_entry() {
        let mut m = MassFunction::over(["a", "b"]).unwrap();
        let foreign = Entry::from_mask(0b100).unwrap();
        assert!(matches!(
            m.assign(foreign, 0.1),
            Err(EvidenceError::SetConversion(_))
        ));
    }

    #[test]
    fn test_display_lists_focal_elements() {
        let mut m = abc();
        m.add_entry(["a", "c"], 0.8).unwrap();
        let text = m.to_string();
        assert!(text.contains("{a, c}: 0.800000"));
        assert!(text.contains("Omega: 0.200000"));
    }
}
