//! Huffman tree construction.
//!
//! Nodes wait in a min-priority queue keyed by `(weight, sequence)`.
//! Leaves are numbered in ascending symbol order and every merged node
//! takes the next number, so among equal weights the earliest inserted
//! node is taken first and two builds of one table give the same tree.
//! Of each merged pair the first node popped becomes the left child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::node::{Node, Tree};

/// A node waiting to be merged.
#[derive(Debug)]
struct Pending {
    seq: u32,
    node: Node,
}

impl Pending {
    fn key(&self) -> (u64, u32) {
        (self.node.weight(), self.seq)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key()) // Min-priority queue
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build a Huffman tree from symbol frequencies.
///
/// Symbols with a zero count are left out. A table with one distinct
/// symbol yields a tree that is a single leaf.
///
/// # Errors
/// Returns `Error::EmptyAlphabet` if no symbol has a non-zero count and
/// `Error::WeightOverflow` if the total weight does not fit in `u64`.
pub fn build_tree(freqs: &FrequencyTable) -> Result<Tree> {
    let mut pq: BinaryHeap<Pending> = freqs
        .iter()
        .enumerate()
        .map(|(seq, (symbol, weight))| Pending {
            seq: seq as u32,
            node: Node::leaf(symbol, weight),
        })
        .collect();

    let leaves = pq.len();
    if leaves == 0 {
        return Err(Error::EmptyAlphabet);
    }

    let mut seq = leaves as u32;
    let root = loop {
        let left = pq.pop().ok_or(Error::EmptyAlphabet)?;
        let Some(right) = pq.pop() else {
            break left.node;
        };
        trace!(
            "merge #{} (w={}) + #{} (w={}) -> #{}",
            left.seq,
            left.node.weight(),
            right.seq,
            right.node.weight(),
            seq
        );
        pq.push(Pending {
            seq,
            node: Node::internal(left.node, right.node)?,
        });
        seq += 1;
    };

    debug!(
        "built huffman tree: {} leaves, depth {}, weight {}",
        leaves,
        root.depth(),
        root.weight()
    );
    Ok(Tree::from(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn check_weights(node: &Node) -> bool {
        match node.children() {
            None => true,
            Some((l, r)) => {
                node.weight() == l.weight() + r.weight() && check_weights(l) && check_weights(r)
            }
        }
    }

    #[test]
    fn test_empty_alphabet() {
        assert!(matches!(
            build_tree(&FrequencyTable::new()),
            Err(Error::EmptyAlphabet)
        ));
    }

    #[test]
    fn test_single_symbol_is_lone_leaf() {
        let freqs: FrequencyTable = [(b'A', 5)].into_iter().collect();
        let tree = build_tree(&freqs).unwrap();
        assert_eq!(tree.root(), Some(&Node::leaf(b'A', 5)));
    }

    #[test]
    fn test_ties_follow_insertion_order() {
        let freqs: FrequencyTable = [(b'a', 1), (b'b', 1), (b'c', 1), (b'd', 1)]
            .into_iter()
            .collect();
        let tree = build_tree(&freqs).unwrap();
        // (a b) and (c d) merge first, in symbol order.
        let expected = Node::internal(
            Node::internal(Node::leaf(b'a', 1), Node::leaf(b'b', 1)).unwrap(),
            Node::internal(Node::leaf(b'c', 1), Node::leaf(b'd', 1)).unwrap(),
        )
        .unwrap();
        assert_eq!(tree.root(), Some(&expected));
    }

    #[test]
    fn test_smaller_weight_is_left() {
        let freqs: FrequencyTable = [(b'x', 7), (b'y', 2)].into_iter().collect();
        let tree = build_tree(&freqs).unwrap();
        let (l, r) = tree.root().unwrap().children().unwrap();
        assert_eq!(l.symbol(), Some(b'y'));
        assert_eq!(r.symbol(), Some(b'x'));
    }

    #[test]
    fn test_overflow_is_reported() {
        let freqs: FrequencyTable = [(0, u64::MAX), (1, u64::MAX)].into_iter().collect();
        assert!(matches!(build_tree(&freqs), Err(Error::WeightOverflow)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_leaves_match_nonzero_symbols(
            counts in prop::collection::vec(0u64..1000, 256),
        ) {
            let mut freqs = FrequencyTable::new();
            for (s, &c) in counts.iter().enumerate() {
                freqs.set(s as u8, c);
            }
            prop_assume!(!freqs.is_empty());

            let tree = build_tree(&freqs).unwrap();
            let root = tree.root().unwrap();
            prop_assert_eq!(root.leaf_count(), freqs.distinct());
            prop_assert_eq!(root.weight(), freqs.iter().map(|(_, c)| c).sum::<u64>());
            prop_assert!(check_weights(root));
            prop_assert_eq!(build_tree(&freqs).unwrap(), tree);
        }
    }
}
