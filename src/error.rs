//! Error types for Huffman tree construction, serialization and decoding.

use thiserror::Error;

/// Error variants for Huffman operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The frequency table has no symbol with a non-zero count.
    #[error("empty alphabet: no symbol has a non-zero frequency")]
    EmptyAlphabet,

    /// The operation needs a tree, but the tree handle is empty.
    #[error("empty tree")]
    EmptyTree,

    /// The input ended before a well-formed structure was fully read.
    #[error("truncated stream")]
    TruncatedStream,

    /// Extra data follows a complete structure.
    #[error("trailing data after serialized tree")]
    TrailingData,

    /// The decoder was stepped without a tree, or walked off the tree.
    #[error("invalid decoder cursor")]
    InvalidCursor,

    /// The serialized leaf count is outside `1..=256`.
    #[error("invalid leaf count: {0}")]
    InvalidLeafCount(u32),

    /// A serialized tree names the same symbol in two leaves.
    #[error("duplicate symbol in serialized tree: {0:#04x}")]
    DuplicateSymbol(u8),

    /// A byte to encode has no code in the table.
    #[error("symbol {0:#04x} has no code")]
    UnknownSymbol(u8),

    /// Summing two subtree weights overflowed `u64`.
    #[error("weight overflow")]
    WeightOverflow,

    /// An I/O error occurred while dumping or loading a tree.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
