//! Compact tree serialization.
//!
//! A tree is written as a 32-bit big-endian leaf count `L` followed by a
//! preorder walk of its nodes: an internal node is the single bit `0`,
//! a leaf is the bit `1` followed by its 8-bit symbol. Bits are packed
//! MSB-first and the final byte is zero padded.
//!
//! ```text
//! +----------------+------------------------------+---------+
//! | L (32 bits BE) | body: 10*L - 1 bits preorder | pad 0-7 |
//! +----------------+------------------------------+---------+
//! ```
//!
//! A tree with `L` leaves has `L - 1` internal nodes, so the body length
//! follows from the count and a reader knows where the tree ends.
//! Weights are not stored; a deserialized tree carries zero weights.

use std::io::{self, Read, Write};

use bitvec::prelude::*;
use log::{debug, warn};

use crate::bits::Bits;
use crate::error::{Error, Result};
use crate::node::{Node, Tree};

/// Largest leaf count a serialized tree may declare.
pub const MAX_LEAVES: u32 = 256;

const HEADER_LEN: usize = 4;

/// Number of body bits for a tree of `leaves` (at least 1) leaves.
fn body_bit_len(leaves: u32) -> usize {
    10 * leaves as usize - 1
}

/// Total serialized size in bytes of a tree with `leaves` leaves,
/// for `leaves` in `1..=MAX_LEAVES`.
pub(crate) fn serialized_len(leaves: u32) -> usize {
    HEADER_LEN + body_bit_len(leaves).div_ceil(8)
}

/// Serialize the shape and leaf symbols of `tree`.
///
/// # Errors
/// Returns `Error::EmptyTree` for a destroyed tree and
/// `Error::InvalidLeafCount` for a hand-built tree with more than
/// [`MAX_LEAVES`] leaves.
pub fn serialize(tree: &Tree) -> Result<Vec<u8>> {
    let root = tree.root().ok_or(Error::EmptyTree)?;
    let leaves = u32::try_from(root.leaf_count()).unwrap_or(u32::MAX);
    if leaves > MAX_LEAVES {
        return Err(Error::InvalidLeafCount(leaves));
    }

    let mut out = Bits::with_capacity(serialized_len(leaves) * 8);
    out.extend_from_bitslice(leaves.to_be_bytes().view_bits::<Msb0>());
    write_node(root, &mut out);
    out.set_uninitialized(false);
    let bytes = out.into_vec();
    debug!("serialized tree: {} leaves, {} bytes", leaves, bytes.len());
    Ok(bytes)
}

fn write_node(node: &Node, out: &mut Bits) {
    match node {
        Node::Leaf { symbol, .. } => {
            out.push(true);
            out.extend_from_bitslice(symbol.view_bits::<Msb0>());
        }
        Node::Internal { left, right, .. } => {
            out.push(false);
            write_node(left, out);
            write_node(right, out);
        }
    }
}

/// Serialize `tree` into `writer`.
pub fn write_tree<W: Write>(tree: &Tree, mut writer: W) -> Result<()> {
    let bytes = serialize(tree)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Rebuild a tree from `bytes`, rejecting anything after it.
///
/// Shorthand for `Deserializer::new().deserialize(bytes)`.
pub fn deserialize(bytes: &[u8]) -> Result<Tree> {
    Deserializer::new().deserialize(bytes)
}

/// Load one serialized tree from `reader`, consuming exactly its bytes.
///
/// # Errors
/// A reader that ends early yields `Error::TruncatedStream`; other read
/// failures are returned as `Error::Io`. Malformed trees fail as for
/// [`Deserializer::deserialize_prefix`].
pub fn read_tree<R: Read>(mut reader: R) -> Result<Tree> {
    let mut buf = vec![0u8; HEADER_LEN];
    read_exact_or_truncated(&mut reader, &mut buf)?;
    let leaves = leaf_count(&buf)?;
    buf.resize(serialized_len(leaves), 0);
    read_exact_or_truncated(&mut reader, &mut buf[HEADER_LEN..])?;
    let (tree, _) = parse(&buf)?;
    Ok(tree)
}

fn read_exact_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::TruncatedStream,
        _ => Error::Io(e),
    })
}

/// What to do with bytes that follow a complete serialized tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingPolicy {
    /// Fail with `Error::TrailingData`.
    #[default]
    Reject,
    /// Leave them unread.
    Ignore,
}

/// Configurable tree deserializer.
///
/// Whatever the policy, the tree itself must fill its declared body
/// exactly and its padding bits must be zero; only bytes after the
/// tree's last byte are subject to [`TrailingPolicy`].
#[derive(Debug, Clone, Default)]
pub struct Deserializer {
    trailing: TrailingPolicy,
}

impl Deserializer {
    /// A deserializer that rejects trailing bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trailing-bytes policy.
    pub fn trailing(mut self, policy: TrailingPolicy) -> Self {
        self.trailing = policy;
        self
    }

    /// Rebuild a tree from `bytes`.
    ///
    /// # Errors
    /// - `Error::TruncatedStream` if the input ends inside the tree.
    /// - `Error::TrailingData` if the tree ends before its declared
    ///   length, has non-zero padding, or (under
    ///   `TrailingPolicy::Reject`) is followed by more bytes.
    /// - `Error::InvalidLeafCount` for a count outside `1..=256`.
    /// - `Error::DuplicateSymbol` if two leaves share a symbol.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Tree> {
        let (tree, used) = parse(bytes)?;
        if used < bytes.len() && self.trailing == TrailingPolicy::Reject {
            warn!(
                "rejecting serialized tree: {} trailing bytes",
                bytes.len() - used
            );
            return Err(Error::TrailingData);
        }
        Ok(tree)
    }

    /// Rebuild a tree stored at the start of `bytes`, returning it with
    /// the number of bytes it occupied. Bytes after it are never read,
    /// whatever the policy.
    ///
    /// # Errors
    /// - `Error::TruncatedStream` if the input ends inside the tree.
    /// - `Error::TrailingData` if the tree ends before its declared
    ///   length or has non-zero padding.
    /// - `Error::InvalidLeafCount` for a count outside `1..=256`.
    /// - `Error::DuplicateSymbol` if two leaves share a symbol.
    pub fn deserialize_prefix(&self, bytes: &[u8]) -> Result<(Tree, usize)> {
        parse(bytes)
    }
}

fn leaf_count(bytes: &[u8]) -> Result<u32> {
    let header: [u8; HEADER_LEN] = bytes
        .get(..HEADER_LEN)
        .and_then(|h| h.try_into().ok())
        .ok_or(Error::TruncatedStream)?;
    let leaves = u32::from_be_bytes(header);
    if leaves == 0 || leaves > MAX_LEAVES {
        return Err(Error::InvalidLeafCount(leaves));
    }
    Ok(leaves)
}

fn parse(bytes: &[u8]) -> Result<(Tree, usize)> {
    let leaves = leaf_count(bytes)?;
    let total = serialized_len(leaves);
    if bytes.len() < total {
        return Err(Error::TruncatedStream);
    }

    let (body, pad) = bytes[HEADER_LEN..total]
        .view_bits::<Msb0>()
        .split_at(body_bit_len(leaves));
    let mut parser = Parser {
        bits: body,
        pos: 0,
        leaves,
        seen: [false; 256],
    };
    let root = parser.node(0)?;

    if parser.pos < body.len() || pad.any() {
        return Err(Error::TrailingData);
    }

    debug!("deserialized tree: {} leaves, {} bytes", leaves, total);
    Ok((Tree::from(root), total))
}

struct Parser<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
    leaves: u32,
    seen: [bool; 256],
}

impl Parser<'_> {
    fn read_bit(&mut self) -> Result<bool> {
        let bit = *self.bits.get(self.pos).ok_or(Error::TruncatedStream)?;
        self.pos += 1;
        Ok(bit)
    }

    fn read_symbol(&mut self) -> Result<u8> {
        let field = self
            .bits
            .get(self.pos..self.pos + 8)
            .ok_or(Error::TruncatedStream)?;
        self.pos += 8;
        Ok(field.load_be::<u8>())
    }

    fn node(&mut self, depth: u32) -> Result<Node> {
        if self.read_bit()? {
            let symbol = self.read_symbol()?;
            if std::mem::replace(&mut self.seen[symbol as usize], true) {
                return Err(Error::DuplicateSymbol(symbol));
            }
            return Ok(Node::leaf(symbol, 0));
        }
        // An internal node at `depth` forces at least `depth + 2` leaves,
        // which cannot fit in the declared body.
        if depth + 2 > self.leaves {
            return Err(Error::TruncatedStream);
        }
        let left = self.node(depth + 1)?;
        let right = self.node(depth + 1)?;
        Ok(Node::unweighted(left, right))
    }
}
