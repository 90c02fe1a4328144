//! The subset space of a finite hypothesis domain.
//!
//! Symbols are kept in sorted order and every subset is a `u32` bitmask over
//! that order, so two subsets with the same members are the same `Entry`
//! however they were built.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_DOMAIN_SIZE;
use crate::error::{EvidenceError, Result};

/// A non-empty subset of a `Domain`, identified by its bitmask.
///
/// Bit `i` is set when the domain's `i`-th symbol (in sorted order) is a
/// member. An `Entry` carries no reference to its domain; `Domain::contains_entry`
/// checks that a mask fits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entry(u32);

#[allow(clippy::len_without_is_empty)]
impl Entry {
    /// Returns `None` for the empty mask.
    pub fn from_mask(mask: u32) -> Option<Self> {
        (mask != 0).then_some(Self(mask))
    }

    pub fn mask(self) -> u32 {
        self.0
    }

    /// Number of symbols in the subset.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// `None` when the two subsets are disjoint.
    pub fn intersection(self, other: Self) -> Option<Self> {
        Self::from_mask(self.0 & other.0)
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Position of this entry in a mask-indexed table.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Immutable, ordered set of unique hypothesis symbols.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Domain {
    symbols: Vec<String>,
}

#[allow(clippy::len_without_is_empty)]
impl Domain {
    /// Build a domain from any list of symbols. See `Domain::singleton` for
    /// a bare scalar.
    ///
    /// Fails on duplicates, on an empty list, and past `MAX_DOMAIN_SIZE`.
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        for symbol in symbols {
            let symbol = symbol.into();
            if seen.contains(&symbol) {
                return Err(EvidenceError::SetConversion(format!(
                    "duplicate symbol '{symbol}' in domain"
                )));
            }
            seen.insert(symbol);
        }

        if seen.is_empty() {
            return Err(EvidenceError::SetConversion(
                "domain must contain at least one symbol".into(),
            ));
        }
        if seen.len() > MAX_DOMAIN_SIZE {
            return Err(EvidenceError::SetConversion(format!(
                "domain has {} symbols, at most {MAX_DOMAIN_SIZE} are supported",
                seen.len()
            )));
        }

        Ok(Self {
            symbols: seen.into_iter().collect(),
        })
    }

    /// One-symbol domain. Omega is the only entry.
    pub fn singleton(symbol: impl Into<String>) -> Self {
        Self {
            symbols: vec![symbol.into()],
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Symbols in canonical (sorted) order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index_of(symbol).is_some()
    }

    /// The full-domain entry.
    pub fn omega(&self) -> Entry {
        Entry(self.full_mask())
    }

    pub(crate) fn full_mask(&self) -> u32 {
        (1u32 << self.symbols.len()) - 1
    }

    /// Length of a mask-indexed table over this domain, slot 0 included.
    pub(crate) fn table_len(&self) -> usize {
        1usize << self.symbols.len()
    }

    fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols
            .binary_search_by(|s| s.as_str().cmp(symbol))
            .ok()
    }

    /// Normalize a candidate subset into an `Entry`.
    ///
    /// Order does not matter. Duplicates, unknown symbols and the empty list
    /// are rejected.
    pub fn entry<I, S>(&self, symbols: I) -> Result<Entry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = 0u32;
        for symbol in symbols {
            let symbol = symbol.as_ref();
            let idx = self.index_of(symbol).ok_or_else(|| {
                EvidenceError::SetConversion(format!(
                    "unknown symbol '{symbol}' for domain {self}"
                ))
            })?;
            let bit = 1u32 << idx;
            if mask & bit != 0 {
                return Err(EvidenceError::SetConversion(format!(
                    "duplicate symbol '{symbol}' in subset"
                )));
            }
            mask |= bit;
        }
        Entry::from_mask(mask)
            .ok_or_else(|| EvidenceError::SetConversion("subset must not be empty".into()))
    }

    /// Singleton entry for one symbol.
    pub fn atom(&self, symbol: &str) -> Result<Entry> {
        self.entry([symbol])
    }

    /// Whether `entry` is a valid subset of this domain.
    pub fn contains_entry(&self, entry: Entry) -> bool {
        entry.0 & !self.full_mask() == 0
    }

    /// Every non-empty subset (2ⁿ − 1 of them) in ascending mask order.
    /// The last one is Omega.
    pub fn entries(&self) -> impl Iterator<Item = Entry> {
        (1..=self.full_mask()).map(Entry)
    }

    /// Domain minus `entry`. `None` when `entry` is Omega.
    pub fn complement(&self, entry: Entry) -> Option<Entry> {
        Entry::from_mask(self.full_mask() & !entry.0)
    }

    pub fn symbols_of(&self, entry: Entry) -> impl Iterator<Item = &str> {
        self.symbols
            .iter()
            .enumerate()
            .filter(move |&(i, _)| entry.0 & (1u32 << i) != 0)
            .map(|(_, s)| s.as_str())
    }

    /// Render an entry as `{a, c}`.
    pub fn describe(&self, entry: Entry) -> String {
        format!("{{{}}}", self.symbols_of(entry).collect::<Vec<_>>().join(", "))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.symbols.join(", "))
    }
}

impl TryFrom<Vec<String>> for Domain {
    type Error = EvidenceError;

    fn try_from(symbols: Vec<String>) -> Result<Self> {
        Self::new(symbols)
    }
}

impl From<&str> for Domain {
    fn from(symbol: &str) -> Self {
        Self::singleton(symbol)
    }
}

impl From<String> for Domain {
    fn from(symbol: String) -> Self {
        Self::singleton(symbol)
    }
}

impl From<Domain> for Vec<String> {
    fn from(domain: Domain) -> Self {
        domain.symbols
    }
}
