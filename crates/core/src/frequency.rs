//! Symbol frequency counting.
//!
//! A symbol is one byte. Text is counted over its UTF-8 bytes, so arbitrary
//! binary input and non-ASCII text both round-trip without special handling.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Occurrence counts for every symbol present in an input.
///
/// Iteration is always in ascending symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    /// Count every byte of `symbols` in a single pass.
    ///
    /// # Errors
    /// `Error::EmptyInput` if `symbols` is empty.
    pub fn from_symbols(symbols: &[u8]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut freqs = [0u64; 256];
        for &symbol in symbols {
            freqs[symbol as usize] += 1;
        }

        let counts = freqs
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
            .collect();

        Ok(Self { counts })
    }

    /// Build a table from explicit `(symbol, weight)` pairs.
    ///
    /// Weights are taken as given, including zero; `HuffmanTree::build`
    /// rejects non-positive weights. A repeated symbol keeps its last weight.
    ///
    /// # Errors
    /// `Error::EmptyInput` if `pairs` yields nothing.
    pub fn from_counts<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let counts: BTreeMap<u8, u64> = pairs.into_iter().collect();
        if counts.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self { counts })
    }

    /// Fold the counts of another partial table into this one.
    ///
    /// Lets input be counted in independent pieces and merged afterwards.
    /// Counts saturate at `u64::MAX`.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (&symbol, &count) in &other.counts {
            let total = self.counts.entry(symbol).or_insert(0);
            *total = total.saturating_add(count);
        }
    }

    /// Count for a single symbol (0 if absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols in the table.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if the table holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(symbol, weight)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}
