//! Huffman tree nodes and the owning tree handle.
//!
//! A [`Node`] is either a leaf carrying one symbol or an internal node
//! owning exactly two children. Children are boxed and never shared, so
//! a tree has no cycles and dropping the root releases every descendant
//! exactly once.

use crate::error::{Error, Result};
use crate::freq::FrequencyTable;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol-bearing node with no children.
    Leaf {
        /// The byte this leaf decodes to.
        symbol: u8,
        /// Frequency of the symbol (zero in a deserialized tree).
        weight: u64,
    },
    /// The merge of two subtrees.
    Internal {
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
        /// Sum of the children's weights (zero in a deserialized tree).
        weight: u64,
    },
}

impl Node {
    /// Create a leaf.
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new internal node weighing their sum.
    ///
    /// # Errors
    /// Returns `Error::WeightOverflow` if the sum does not fit in `u64`.
    pub fn internal(left: Node, right: Node) -> Result<Self> {
        let weight = left
            .weight()
            .checked_add(right.weight())
            .ok_or(Error::WeightOverflow)?;
        Ok(Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
            weight,
        })
    }

    /// Join two subtrees without a meaningful weight, as rebuilt from a
    /// serialized stream.
    pub(crate) fn unweighted(left: Node, right: Node) -> Self {
        Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
            weight: 0,
        }
    }

    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// True for a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The leaf's symbol, `None` for an internal node.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// `(left, right)` for an internal node, `None` for a leaf.
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }

    /// Child selected by a code bit: `0` is left, anything else right.
    pub(crate) fn child(&self, bit: u8) -> Option<&Node> {
        self.children()
            .map(|(left, right)| if bit == 0 { left } else { right })
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path (0 for a lone leaf).
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Same shape and leaf symbols, ignoring weights.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Leaf { symbol: a, .. }, Node::Leaf { symbol: b, .. }) => a == b,
            (
                Node::Internal {
                    left: l1,
                    right: r1,
                    ..
                },
                Node::Internal {
                    left: l2,
                    right: r2,
                    ..
                },
            ) => l1.same_shape(l2) && r1.same_shape(r2),
            _ => false,
        }
    }
}

/// An owned Huffman tree.
///
/// Built by [`crate::build_tree`] or [`crate::deserialize`]; the handle
/// is empty only after [`Tree::destroy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    root: Option<Node>,
}

impl Tree {
    /// Build a tree from symbol frequencies.
    ///
    /// See [`crate::build_tree`].
    pub fn from_frequencies(freqs: &FrequencyTable) -> Result<Self> {
        crate::builder::build_tree(freqs)
    }

    /// The root node, `None` once destroyed.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// True if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of leaves (distinct symbols); 0 for an empty tree.
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::leaf_count)
    }

    /// Release every node. Calling this on an empty tree does nothing.
    pub fn destroy(&mut self) {
        self.root = None;
    }

    /// Consume the tree, returning its root.
    pub fn into_root(self) -> Option<Node> {
        self.root
    }
}

impl From<Node> for Tree {
    fn from(root: Node) -> Self {
        Self { root: Some(root) }
    }
}
