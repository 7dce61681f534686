//! Bit-at-a-time decoding.

use crate::bits::PackedBits;
use crate::error::{Error, Result};
use crate::node::{Node, Tree};

/// A cursor walking a borrowed tree one code bit at a time.
///
/// The tree is only read, so any number of decoders may share it.
#[derive(Debug, Clone, Default)]
pub struct Decoder<'t> {
    root: Option<&'t Node>,
    cursor: Option<&'t Node>,
}

impl<'t> Decoder<'t> {
    /// Create a decoder positioned at the root of `tree`.
    pub fn new(tree: &'t Tree) -> Self {
        let mut decoder = Self::default();
        decoder.load(tree);
        decoder
    }

    /// Switch to `tree`, positioned at its root.
    pub fn load(&mut self, tree: &'t Tree) {
        self.root = tree.root();
        self.cursor = self.root;
    }

    /// Return the cursor to the root, dropping a partially read code.
    pub fn reset(&mut self) {
        self.cursor = self.root;
    }

    /// True between codes.
    pub fn is_at_root(&self) -> bool {
        match (self.cursor, self.root) {
            (Some(c), Some(r)) => std::ptr::eq(c, r),
            _ => true,
        }
    }

    /// Advance by one bit: `0` goes left, anything else goes right.
    ///
    /// Returns the symbol when the step lands on a leaf (the cursor then
    /// goes back to the root), `None` otherwise. When the whole tree is a
    /// single leaf its code is `0`, so bit `0` emits that symbol.
    ///
    /// # Errors
    /// Returns `Error::InvalidCursor` if no tree is loaded or the step
    /// leads to a child that does not exist.
    pub fn step(&mut self, bit: u8) -> Result<Option<u8>> {
        let (Some(root), Some(cursor)) = (self.root, self.cursor) else {
            return Err(Error::InvalidCursor);
        };

        if let Node::Leaf { symbol, .. } = root {
            return if bit == 0 {
                Ok(Some(*symbol))
            } else {
                Err(Error::InvalidCursor)
            };
        }

        let next = cursor.child(bit).ok_or(Error::InvalidCursor)?;
        match next {
            Node::Leaf { symbol, .. } => {
                self.cursor = Some(root);
                Ok(Some(*symbol))
            }
            Node::Internal { .. } => {
                self.cursor = Some(next);
                Ok(None)
            }
        }
    }

    /// Decode every valid bit of `bits`.
    ///
    /// # Errors
    /// Returns `Error::TruncatedStream` if the stream stops in the middle
    /// of a code, and `Error::InvalidCursor` as for [`Decoder::step`].
    pub fn decode(&mut self, bits: &PackedBits) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for bit in bits.iter() {
            if let Some(symbol) = self.step(bit as u8)? {
                out.push(symbol);
            }
        }
        if !self.is_at_root() {
            self.reset();
            return Err(Error::TruncatedStream);
        }
        Ok(out)
    }
}
