//! # Huffman Trees
//!
//! *Optimal prefix codes: build the tree, read off the codes, ship the shape.*
//!
//! ## Intuition First
//!
//! Take the two rarest symbols and glue them together into one
//! pseudo-symbol whose frequency is their sum. Repeat until one
//! pseudo-symbol is left. The gluing history is a binary tree, and the
//! path from the root to each original symbol (`0` for left, `1` for
//! right) is that symbol's code. Rare symbols were glued early, so they
//! sit deep in the tree and get long codes; common symbols get short ones.
//!
//! Because every symbol is a leaf, no code is a prefix of another, and a
//! decoder can walk the tree bit by bit, emitting a symbol each time it
//! lands on a leaf.
//!
//! ## Mathematical Formulation
//!
//! For symbols $s$ with frequencies $f_s$ and code lengths $\ell_s$, a
//! Huffman code minimizes
//!
//! ```text
//! cost = Σ_s f_s · ℓ_s
//! ```
//!
//! over all prefix-free codes.
//!
//! ## Determinism
//!
//! Equal weights are merged in insertion order (leaves by ascending
//! symbol, merged nodes in creation order), and the first node taken
//! becomes the left child. One frequency table always yields one tree.
//!
//! ## Serialized Trees
//!
//! [`serialize`] writes only the tree's shape and leaf symbols, in
//! preorder, behind a 32-bit leaf count; see [`serial`] for the layout.
//! [`deserialize`] rebuilds a tree that decodes identically, but whose
//! weights are zero.
//!
//! ## Example
//!
//! ```
//! use hufftree::{CodeTable, Decoder, FrequencyTable, Tree};
//!
//! let data = b"mississippi";
//! let tree = Tree::from_frequencies(&FrequencyTable::of(data))?;
//! let bits = CodeTable::from_tree(&tree)?.encode(data)?;
//!
//! let shipped = hufftree::serialize(&tree)?;
//! let received = hufftree::deserialize(&shipped)?;
//! assert_eq!(Decoder::new(&received).decode(&bits)?, data);
//! # Ok::<(), hufftree::Error>(())
//! ```
//!
//! ## Failure Modes
//!
//! 1. **Empty input**: no non-zero frequency, no tree ([`Error::EmptyAlphabet`]).
//! 2. **Damaged streams**: truncated or padded serialized trees are
//!    rejected rather than half-built.
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod builder;
pub mod code;
pub mod decoder;
pub mod error;
pub mod freq;
pub mod node;
pub mod serial;

pub use bits::{Bits, PackedBits};
pub use builder::build_tree;
pub use code::{Code, CodeTable};
pub use decoder::Decoder;
pub use error::{Error, Result};
pub use freq::FrequencyTable;
pub use node::{Node, Tree};
pub use serial::{deserialize, read_tree, serialize, write_tree, Deserializer, TrailingPolicy};
