// allele.rs - Allele calls and allele alphabets

use crate::error::{AsdistError, Result};
use std::fmt::{Display, Formatter};

/// Index of an allele symbol inside an [`AlleleAlphabet`]
pub type AlleleIndex = u16;

/// Diploid genotype call for one individual at one locus.
///
/// A call is either fully observed or fully missing: decoding never keeps a
/// single observed allele next to a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlleleCall {
    Called(AlleleIndex, AlleleIndex),
    #[default]
    Missing,
}

impl AlleleCall {
    pub fn is_missing(&self) -> bool {
        matches!(self, AlleleCall::Missing)
    }

    /// Both alleles, in the order they were decoded
    pub fn alleles(&self) -> Option<(AlleleIndex, AlleleIndex)> {
        match *self {
            AlleleCall::Called(a, b) => Some((a, b)),
            AlleleCall::Missing => None,
        }
    }
}

impl Display for AlleleCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AlleleCall::Called(a, b) => write!(f, "({},{})", a, b),
            AlleleCall::Missing => write!(f, "MISSING"),
        }
    }
}

/// Ordered list of distinct allele symbols.
///
/// Frequency tables carry one slot per symbol plus a trailing missing slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlleleAlphabet {
    symbols: Vec<String>,
}

impl AlleleAlphabet {
    /// Parse a comma-separated alphabet such as `A,C,T,G`
    pub fn parse(alleles: &str) -> Result<Self> {
        let symbols: Vec<String> = alleles
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        if symbols.iter().any(|s| s.is_empty()) {
            return Err(AsdistError::usage(format!(
                "Allele alphabet '{}' contains an empty symbol",
                alleles
            )));
        }
        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(AsdistError::usage(format!(
                    "Allele alphabet '{}' lists '{}' more than once",
                    alleles, symbol
                )));
            }
        }
        if symbols.len() > AlleleIndex::MAX as usize {
            return Err(AsdistError::usage(format!(
                "Allele alphabet has {} symbols, at most {} are supported",
                symbols.len(),
                AlleleIndex::MAX
            )));
        }

        Ok(Self { symbols })
    }

    /// Fixed two-symbol alphabet used by the 0/1/2 encoding
    pub fn binary() -> Self {
        Self {
            symbols: vec!["0".to_string(), "1".to_string()],
        }
    }

    pub fn index_of(&self, symbol: &str) -> Option<AlleleIndex> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .map(|i| i as AlleleIndex)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index_of(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Slots per frequency row: every symbol plus the missing slot
    pub fn slots(&self) -> usize {
        self.symbols.len() + 1
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}
