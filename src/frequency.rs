use std::collections::HashMap;

use crate::error::{Result, SymhuffError};
use crate::symbol::Symbol;

/// Occurrence count of every distinct symbol in a source.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<Symbol, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Count a full symbol sequence.
    ///
    /// Fails with [`SymhuffError::EmptyInput`] when the sequence is empty and
    /// propagates the first extraction error.
    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Symbol>>,
    {
        let mut table = Self::default();
        for symbol in symbols {
            table.record(symbol?);
        }
        if table.total == 0 {
            return Err(SymhuffError::EmptyInput);
        }
        Ok(table)
    }

    fn record(&mut self, symbol: Symbol) {
        *self.counts.entry(symbol).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn get(&self, symbol: &[u8]) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of symbols extracted from the source.
    pub fn total_symbols(&self) -> u64 {
        self.total
    }

    /// Size of the source in bytes.
    pub fn input_bytes(&self) -> u64 {
        self.counts
            .iter()
            .map(|(symbol, count)| symbol.len() as u64 * count)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, u64)> {
        self.counts.iter().map(|(symbol, &count)| (symbol, count))
    }
}
