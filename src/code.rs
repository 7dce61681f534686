//! Per-symbol code tables.
//!
//! A code is the path from the root to a leaf: `0` for each step to a
//! left child, `1` for each step to a right child. A tree made of a
//! single leaf gives that leaf the one-bit code `0`.

use std::fmt;

use bitvec::prelude::*;
use log::debug;

use crate::bits::{Bits, PackedBits};
use crate::error::{Error, Result};
use crate::node::{Node, Tree};

/// A bit string, first bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Bits,
}

impl Code {
    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for the zero-length code, which no table ever contains.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, `true` for `1`.
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Iterate the bits in transmission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// True if `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.len() >= self.len() && other.bits[..self.len()] == self.bits[..]
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol → code mapping derived from a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>, // symbol -> code
}

impl CodeTable {
    /// Assign every leaf of `tree` its root-to-leaf code.
    ///
    /// # Errors
    /// Returns `Error::EmptyTree` if the tree has been destroyed.
    pub fn from_tree(tree: &Tree) -> Result<Self> {
        let root = tree.root().ok_or(Error::EmptyTree)?;
        let mut codes = vec![None; 256];
        if let Node::Leaf { symbol, .. } = root {
            codes[*symbol as usize] = Some(Code {
                bits: bitvec![u8, Msb0; 0],
            });
        } else {
            Self::build_codes(root, &mut Bits::new(), &mut codes);
        }
        let table = Self { codes };
        debug!(
            "built code table: {} symbols, longest code {} bits",
            table.len(),
            table.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
        );
        Ok(table)
    }

    fn build_codes(node: &Node, prefix: &mut Bits, codes: &mut [Option<Code>]) {
        match node {
            Node::Leaf { symbol, .. } => {
                codes[*symbol as usize] = Some(Code {
                    bits: prefix.clone(),
                });
            }
            Node::Internal { left, right, .. } => {
                prefix.push(false);
                Self::build_codes(left, prefix, codes);
                prefix.pop();

                prefix.push(true);
                Self::build_codes(right, prefix, codes);
                prefix.pop();
            }
        }
    }

    /// Code of `symbol`, `None` if the symbol is not in the tree.
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_ref().map(|c| (s as u8, c)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// True if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, symbol: u8) -> Result<&Code> {
        self.get(symbol).ok_or(Error::UnknownSymbol(symbol))
    }

    /// Number of bits `encode` would produce for `data`.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` for a byte with no code.
    pub fn encoded_bit_len(&self, data: &[u8]) -> Result<u64> {
        data.iter().try_fold(0u64, |acc, &s| -> Result<u64> {
            Ok(acc + self.lookup(s)?.len() as u64)
        })
    }

    /// Concatenate the codes of `data`, packed MSB-first.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` for a byte with no code.
    pub fn encode(&self, data: &[u8]) -> Result<PackedBits> {
        let bit_len = self.encoded_bit_len(data)?;
        let mut out = Bits::with_capacity(bit_len as usize);
        for &s in data {
            out.extend_from_bitslice(&self.lookup(s)?.bits);
        }
        Ok(PackedBits::from(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FrequencyTable;
    use proptest::prelude::*;

    fn clrs_table() -> FrequencyTable {
        [
            (b'A', 5),
            (b'B', 9),
            (b'C', 12),
            (b'D', 13),
            (b'E', 16),
            (b'F', 45),
        ]
        .into_iter()
        .collect()
    }

    fn code_str(table: &CodeTable, symbol: u8) -> String {
        table.get(symbol).unwrap().to_string()
    }

    #[test]
    fn test_clrs_codes() {
        let freqs = clrs_table();
        let table = CodeTable::from_tree(&Tree::from_frequencies(&freqs).unwrap()).unwrap();

        assert_eq!(code_str(&table, b'F'), "0");
        assert_eq!(code_str(&table, b'C'), "100");
        assert_eq!(code_str(&table, b'D'), "101");
        assert_eq!(code_str(&table, b'A'), "1100");
        assert_eq!(code_str(&table, b'B'), "1101");
        assert_eq!(code_str(&table, b'E'), "111");

        let longest = table.iter().map(|(_, c)| c.len()).max().unwrap();
        assert_eq!(table.get(b'A').unwrap().len(), longest);
        assert!(table.iter().all(|(_, c)| c.len() >= table.get(b'F').unwrap().len()));

        let cost: u64 = freqs
            .iter()
            .map(|(s, f)| f * table.get(s).unwrap().len() as u64)
            .sum();
        assert_eq!(cost, 224);
    }

    #[test]
    fn test_single_leaf_gets_one_bit() {
        let freqs: FrequencyTable = [(b'A', 5)].into_iter().collect();
        let table = CodeTable::from_tree(&Tree::from_frequencies(&freqs).unwrap()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(code_str(&table, b'A'), "0");
        assert!(table.get(b'B').is_none());
    }

    #[test]
    fn test_empty_tree() {
        let mut tree = Tree::from(Node::leaf(1, 1));
        tree.destroy();
        assert!(matches!(CodeTable::from_tree(&tree), Err(Error::EmptyTree)));
    }

    #[test]
    fn test_encode_packs_codes() {
        let table = CodeTable::from_tree(&Tree::from_frequencies(&clrs_table()).unwrap()).unwrap();
        // F A C -> 0 1100 100
        let packed = table.encode(b"FAC").unwrap();
        assert_eq!(packed.bit_len(), 8);
        assert_eq!(packed.as_bytes(), &[0b0110_0100]);
        assert!(matches!(table.encode(b"FZ"), Err(Error::UnknownSymbol(b'Z'))));
        assert_eq!(table.encoded_bit_len(b"").unwrap(), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_codes_are_prefix_free(
            data in prop::collection::vec(any::<u8>(), 1..400),
        ) {
            let freqs = FrequencyTable::of(&data);
            let tree = Tree::from_frequencies(&freqs).unwrap();
            let table = CodeTable::from_tree(&tree).unwrap();
            prop_assert_eq!(table.len(), freqs.distinct());

            let codes: Vec<_> = table.iter().collect();
            for (i, (_, a)) in codes.iter().enumerate() {
                prop_assert!(!a.is_empty());
                for (_, b) in &codes[i + 1..] {
                    prop_assert!(!a.is_prefix_of(b));
                    prop_assert!(!b.is_prefix_of(a));
                }
            }
        }
    }
}
