//! Symbol frequency tables.

use std::ops::{Index, IndexMut};

/// Count of occurrences for each byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// A table with every count zero.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Histogram of `data`.
    pub fn of(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &b in data {
            table.add(b, 1);
        }
        table
    }

    /// Add `n` occurrences of `symbol`, saturating at `u64::MAX`.
    pub fn add(&mut self, symbol: u8, n: u64) {
        let c = &mut self.counts[symbol as usize];
        *c = c.saturating_add(n);
    }

    /// Overwrite the count of `symbol`.
    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Count of `symbol`.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// `(symbol, count)` for every symbol with a non-zero count, in
    /// ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True if no symbol has a non-zero count.
    pub fn is_empty(&self) -> bool {
        self.distinct() == 0
    }

    /// The raw table, indexed by byte value.
    pub fn as_array(&self) -> &[u64; 256] {
        &self.counts
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u64; 256]> for FrequencyTable {
    fn from(counts: [u64; 256]) -> Self {
        Self { counts }
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.add(symbol, count);
        }
        table
    }
}

impl Index<u8> for FrequencyTable {
    type Output = u64;

    fn index(&self, symbol: u8) -> &u64 {
        &self.counts[symbol as usize]
    }
}

impl IndexMut<u8> for FrequencyTable {
    fn index_mut(&mut self, symbol: u8) -> &mut u64 {
        &mut self.counts[symbol as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram() {
        let t = FrequencyTable::of(b"abracadabra");
        assert_eq!(t[b'a'], 5);
        assert_eq!(t.get(b'b'), 2);
        assert_eq!(t[b'z'], 0);
        assert_eq!(t.distinct(), 5);
        let symbols: Vec<u8> = t.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, b"abcdr".to_vec());
    }

    #[test]
    fn test_from_pairs_accumulates() {
        let t: FrequencyTable = [(b'x', 2), (b'y', 0), (b'x', 3)].into_iter().collect();
        assert_eq!(t[b'x'], 5);
        assert_eq!(t.distinct(), 1);
        assert!(FrequencyTable::new().is_empty());
    }
}
