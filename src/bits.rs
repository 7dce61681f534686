//! MSB-first bit streams.
//!
//! Every bit stream in this crate (serialized trees and encoded symbol
//! data) is a [`Bits`] vector: bytes filled most-significant-bit first,
//! so the first bit pushed is bit 7 of byte 0. When handed out as bytes
//! the final byte is padded with zero bits, so a stream is described by
//! its bytes plus the number of valid bits.

use bitvec::prelude::*;

use crate::error::{Error, Result};

/// Growable MSB-first bit vector.
pub type Bits = BitVec<u8, Msb0>;

/// A packed bit stream: bytes plus the count of valid bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    bits: Bits,
}

impl PackedBits {
    /// Wrap received bytes holding `bit_len` valid bits.
    ///
    /// Bits past `bit_len` in the last byte are cleared.
    ///
    /// # Errors
    /// Returns `Error::TruncatedStream` if `bytes` holds fewer than
    /// `bit_len` bits.
    pub fn new(bytes: Vec<u8>, bit_len: u64) -> Result<Self> {
        if bit_len > bytes.len() as u64 * 8 {
            return Err(Error::TruncatedStream);
        }
        let mut bits = Bits::from_vec(bytes);
        bits.truncate(bit_len as usize);
        Ok(Self::from(bits))
    }

    /// The packed bytes, including the zero padding of the last byte.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// The valid bits.
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Number of valid bits.
    pub fn bit_len(&self) -> u64 {
        self.bits.len() as u64
    }

    /// True if the stream holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate the valid bits in transmission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Consume and return the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bits.into_vec()
    }
}

impl From<Bits> for PackedBits {
    fn from(mut bits: Bits) -> Self {
        bits.set_uninitialized(false);
        Self { bits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_msb_first() {
        let mut bits = Bits::new();
        bits.extend_from_bitslice(0xffu8.view_bits::<Msb0>());
        bits.extend_from_bitslice(bits![u8, Msb0; 1, 1, 0]);
        let packed = PackedBits::from(bits);
        assert_eq!(packed.as_bytes(), &[0b1111_1111, 0b1100_0000]);
        assert_eq!(packed.bit_len(), 11);
    }

    #[test]
    fn test_new_clears_padding() {
        let packed = PackedBits::new(vec![0b1011_1111], 3).unwrap();
        assert_eq!(packed.iter().collect::<Vec<_>>(), vec![true, false, true]);
        assert_eq!(packed.as_bytes(), &[0b1010_0000]);
        assert_eq!(packed.into_bytes(), vec![0b1010_0000]);
    }

    #[test]
    fn test_packed_bits_rejects_short_buffer() {
        assert!(matches!(
            PackedBits::new(vec![0], 9),
            Err(Error::TruncatedStream)
        ));
        assert!(PackedBits::new(vec![0], 8).is_ok());
        assert!(PackedBits::new(Vec::new(), 0).unwrap().is_empty());
    }
}
