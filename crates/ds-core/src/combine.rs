//! Dempster's rule of combination.
//!
//! Each pair of focal elements contributes the product of their masses to
//! their intersection. Pairs with an empty intersection are conflict; the
//! surviving masses are rescaled by `1 / (1 - conflict)`. The rule is
//! commutative and associative, so many sources can be folded left to right
//! or reduced as a balanced tree with the same result.

use crate::constants::TOLERANCE;
use crate::domain::Entry;
use crate::error::{EvidenceError, Result};
use crate::mass::MassFunction;

/// Combine two independent mass functions over the same domain.
///
/// Neither input is modified. Fails with `DomainMismatch` when the domains
/// differ and with `FullConflict` when the sources contradict each other
/// completely.
pub fn accumulate(m1: &MassFunction, m2: &MassFunction) -> Result<MassFunction> {
    if m1.domain() != m2.domain() {
        return Err(EvidenceError::DomainMismatch {
            left: m1.domain().to_string(),
            right: m2.domain().to_string(),
        });
    }

    let domain = m1.shared_domain();
    let omega = domain.omega();
    let mut raw = vec![0.0; domain.table_len()];
    let mut conflict = 0.0;

    for (e1, w1) in m1.focal_elements() {
        for (e2, w2) in m2.focal_elements() {
            let product = w1 * w2;
            match e1.intersection(e2) {
                None => conflict += product,
                // Omega is recomputed by the result's own bookkeeping.
                Some(shared) if shared == omega => {}
                Some(shared) => raw[shared.index()] += product,
            }
        }
    }

    let norm = 1.0 - conflict;
    if norm.abs() < TOLERANCE {
        return Err(EvidenceError::FullConflict { conflict });
    }

    let mut combined = MassFunction::new(domain);
    for (mask, &mass) in raw.iter().enumerate() {
        if mass == 0.0 {
            continue;
        }
        if let Some(entry) = Entry::from_mask(mask as u32) {
            combined.assign(entry, mass / norm)?;
        }
    }
    Ok(combined)
}

/// Left fold of `accumulate` over every source.
pub fn accumulate_all<'a, I>(sources: I) -> Result<MassFunction>
where
    I: IntoIterator<Item = &'a MassFunction>,
{
    let mut sources = sources.into_iter();
    let first = sources.next().ok_or(EvidenceError::NoSources)?;
    sources.try_fold(first.clone(), |acc, next| accumulate(&acc, next))
}

/// Balanced pairwise reduction. The two halves are combined in parallel on
/// the rayon pool, then merged.
pub fn accumulate_tree(sources: &[MassFunction]) -> Result<MassFunction> {
    match sources {
        [] => Err(EvidenceError::NoSources),
        [single] => Ok(single.clone()),
        _ => {
            let (left, right) = sources.split_at(sources.len() / 2);
            let (left, right) = rayon::join(|| accumulate_tree(left), || accumulate_tree(right));
            accumulate(&left?, &right?)
        }
    }
}
