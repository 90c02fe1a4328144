use std::fmt;

use crate::constants::OMEGA;
use crate::domain::{Domain, Entry};
use crate::error::{EvidenceError, Result};

/// Target of an assignment or a query.
///
/// `Subset` holds several symbols meaning their union; an empty `Subset` is the
/// "no selector given" case and resolves to `EmptySelector`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Atom(String),
    Subset(Vec<String>),
    FullDomain,
}

impl Selector {
    /// Union of several symbols.
    pub fn union<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Subset(symbols.into_iter().map(Into::into).collect())
    }

    /// Parse a command-line target: `Omega`, a single symbol, or a
    /// comma-separated list of symbols.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text == OMEGA {
            return Self::FullDomain;
        }
        let parts: Vec<String> = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        match parts.len() {
            1 => Self::Atom(parts.into_iter().next().unwrap_or_default()),
            _ => Self::Subset(parts),
        }
    }

    /// Resolve against a domain into a canonical `Entry`.
    pub fn resolve(&self, domain: &Domain) -> Result<Entry> {
        match self {
            Self::Atom(symbol) => domain.atom(symbol),
            Self::Subset(symbols) if symbols.is_empty() => Err(EvidenceError::EmptySelector),
            Self::Subset(symbols) => domain.entry(symbols),
            Self::FullDomain => Ok(domain.omega()),
        }
    }
}

/// `"Omega"` selects the full domain, anything else a single symbol.
impl From<&str> for Selector {
    fn from(symbol: &str) -> Self {
        if symbol == OMEGA {
            Self::FullDomain
        } else {
            Self::Atom(symbol.to_string())
        }
    }
}

impl From<String> for Selector {
    fn from(symbol: String) -> Self {
        Self::from(symbol.as_str())
    }
}

impl From<&[&str]> for Selector {
    fn from(symbols: &[&str]) -> Self {
        Self::union(symbols.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Selector {
    fn from(symbols: [&str; N]) -> Self {
        Self::union(symbols)
    }
}

impl From<Vec<String>> for Selector {
    fn from(symbols: Vec<String>) -> Self {
        Self::Subset(symbols)
    }
}

impl From<&Selector> for Selector {
    fn from(selector: &Selector) -> Self {
        selector.clone()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(symbol) => write!(f, "{symbol}"),
            Self::Subset(symbols) => write!(f, "{{{}}}", symbols.join(", ")),
            Self::FullDomain => write!(f, "{OMEGA}"),
        }
    }
}
