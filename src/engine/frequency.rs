use std::collections::BTreeMap;

use crate::engine::error::CodecError;

/// Occurrence count per distinct byte of an input.
///
/// Every stored count is at least 1. Iteration is in ascending symbol order,
/// which is also the order the tree builder uses to break frequency ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn build(input: &[u8]) -> Self {
        let mut counts = BTreeMap::new();
        for &symbol in input {
            *counts.entry(symbol).or_insert(0u64) += 1;
        }
        Self { counts }
    }

    /// Rebuild a table from transmitted `(symbol, count)` pairs.
    ///
    /// The counts must sum to at most `u64::MAX`, which keeps `total` and
    /// every merged tree weight in range.
    pub fn from_counts<I>(pairs: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = BTreeMap::new();
        let mut total = 0u64;
        for (symbol, count) in pairs {
            if count == 0 {
                return Err(CodecError::InvalidFrequency {
                    symbol,
                    reason: "zero count".to_string(),
                });
            }
            total = total.checked_add(count).ok_or_else(|| CodecError::InvalidFrequency {
                symbol,
                reason: "counts overflow a 64-bit total".to_string(),
            })?;
            if counts.insert(symbol, count).is_some() {
                return Err(CodecError::InvalidFrequency {
                    symbol,
                    reason: "duplicate symbol".to_string(),
                });
            }
        }
        Ok(Self { counts })
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Shannon entropy in bits per symbol, the lower bound on the
    /// average code length.
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }
        self.counts
            .values()
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_abracadabra() {
        let table = FrequencyTable::build(b"abracadabra");
        let counts: Vec<_> = table.iter().collect();
        assert_eq!(
            counts,
            vec![(b'a', 5), (b'b', 2), (b'c', 1), (b'd', 1), (b'r', 2)]
        );
        assert_eq!(table.total(), 11);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = FrequencyTable::build(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.entropy_bits(), 0.0);
    }

    #[test]
    fn from_counts_rejects_zero_and_duplicates() {
        assert!(matches!(
            FrequencyTable::from_counts([(b'a', 0)]),
            Err(CodecError::InvalidFrequency { symbol: b'a', .. })
        ));
        assert!(matches!(
            FrequencyTable::from_counts([(b'a', 1), (b'a', 2)]),
            Err(CodecError::InvalidFrequency { symbol: b'a', .. })
        ));

        let table = FrequencyTable::from_counts([(b'z', 3), (b'y', 1)]).unwrap();
        assert_eq!(table, FrequencyTable::build(b"zzzy"));
    }

    #[test]
    fn from_counts_rejects_overflowing_total() {
        assert_eq!(
            FrequencyTable::from_counts([(b'a', u64::MAX), (b'b', 1)]),
            Err(CodecError::InvalidFrequency {
                symbol: b'b',
                reason: "counts overflow a 64-bit total".to_string(),
            })
        );

        let table = FrequencyTable::from_counts([(b'a', u64::MAX - 1), (b'b', 1)]).unwrap();
        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn entropy_of_two_equal_symbols_is_one_bit() {
        let table = FrequencyTable::build(b"abab");
        assert!((table.entropy_bits() - 1.0).abs() < 1e-12);
    }
}
