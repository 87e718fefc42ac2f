//! Bit sequences: the shared packed representation plus the typed
//! [`BitVector`] and [`BitList`] wrappers.
//!
//! Bits are packed little-endian within each byte: bit `i` lives in byte
//! `i / 8` at position `i % 8`. Unused high bits of the last byte are always
//! zero. The bitlist sentinel exists only in the wire/text form and is added
//! or stripped at the boundary by [`Bits::to_bitlist_bytes`] and
//! [`Bits::from_bitlist_bytes`].

use crate::error::{CapacityError, MalformedEncoding};

/// A packed run of bits with an exact logical length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bits {
    len: usize,
    bytes: Vec<u8>,
}

impl Bits {
    /// All-zero bits of the given length.
    pub fn zeros(len: usize) -> Self {
        Self {
            len,
            bytes: vec![0; len.div_ceil(8)],
        }
    }

    /// Build from one bool per bit.
    pub fn from_bools(bits: &[bool]) -> Self {
        let mut out = Self::zeros(bits.len());
        for (i, bit) in bits.iter().enumerate() {
            if *bit {
                out.bytes[i / 8] |= 1 << (i % 8);
            }
        }
        out
    }

    /// Adopt packed bytes holding exactly `len` bits.
    ///
    /// Fails if the byte count is not `ceil(len / 8)` or any unused high bit
    /// is set.
    pub fn from_packed(bytes: Vec<u8>, len: usize) -> Result<Self, MalformedEncoding> {
        let expected = len.div_ceil(8);
        if bytes.len() != expected {
            return Err(MalformedEncoding::BitLength {
                expected,
                actual: bytes.len(),
            });
        }
        if len % 8 != 0 {
            if let Some(&last) = bytes.last() {
                if last >> (len % 8) != 0 {
                    return Err(MalformedEncoding::UnusedBitsSet);
                }
            }
        }
        Ok(Self { len, bytes })
    }

    /// Parse the wire form of a bitlist: packed bits followed by a single
    /// sentinel bit marking the logical length.
    pub fn from_bitlist_bytes(bytes: &[u8], max: usize) -> Result<Self, MalformedEncoding> {
        let last = match bytes.last() {
            Some(last) => *last,
            None => return Err(MalformedEncoding::MissingSentinel),
        };
        if last == 0 {
            return Err(MalformedEncoding::MissingSentinel);
        }
        let sentinel = 7 - last.leading_zeros() as usize;
        let len = (bytes.len() - 1) * 8 + sentinel;
        if len > max {
            return Err(MalformedEncoding::TooManyElements { max, actual: len });
        }

        let mut packed = bytes.to_vec();
        if sentinel == 0 {
            packed.pop();
        } else if let Some(tail) = packed.last_mut() {
            *tail &= !(1 << sentinel);
        }
        Ok(Self { len, bytes: packed })
    }

    /// Wire form of a bitlist: packed bits plus the sentinel bit.
    pub fn to_bitlist_bytes(&self) -> Vec<u8> {
        let mut out = self.bytes.clone();
        if self.len % 8 == 0 {
            out.push(1);
        } else if let Some(tail) = out.last_mut() {
            *tail |= 1 << (self.len % 8);
        }
        out
    }

    /// Logical number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Packed bytes without any sentinel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read bit `i`, `None` past the end.
    pub fn get(&self, i: usize) -> Option<bool> {
        (i < self.len).then(|| (self.bytes[i / 8] >> (i % 8)) & 1 == 1)
    }

    /// Set bit `i`. Returns `false` if `i` is out of range.
    pub fn set(&mut self, i: usize, value: bool) -> bool {
        if i >= self.len {
            return false;
        }
        if value {
            self.bytes[i / 8] |= 1 << (i % 8);
        } else {
            self.bytes[i / 8] &= !(1 << (i % 8));
        }
        true
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }
}

/// Exactly `N` bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVector<const N: usize>(Bits);

impl<const N: usize> BitVector<N> {
    /// All bits clear.
    pub fn new() -> Self {
        Self(Bits::zeros(N))
    }

    /// Wrap bits, which must number exactly `N`.
    pub fn from_bits(bits: Bits) -> Result<Self, CapacityError> {
        if bits.len() != N {
            return Err(CapacityError::Exact {
                expected: N,
                actual: bits.len(),
            });
        }
        Ok(Self(bits))
    }

    pub fn bits(&self) -> &Bits {
        &self.0
    }

    pub fn get(&self, i: usize) -> Option<bool> {
        self.0.get(i)
    }

    pub fn set(&mut self, i: usize, value: bool) -> bool {
        self.0.set(i, value)
    }
}

impl<const N: usize> Default for BitVector<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Up to `N` bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitList<const N: usize>(Bits);

impl<const N: usize> BitList<N> {
    /// `len` clear bits; `len` must not exceed `N`.
    pub fn with_len(len: usize) -> Result<Self, CapacityError> {
        Self::from_bits(Bits::zeros(len))
    }

    /// Wrap bits, which must number at most `N`.
    pub fn from_bits(bits: Bits) -> Result<Self, CapacityError> {
        if bits.len() > N {
            return Err(CapacityError::Exceeded {
                max: N,
                actual: bits.len(),
            });
        }
        Ok(Self(bits))
    }

    pub fn bits(&self) -> &Bits {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<bool> {
        self.0.get(i)
    }

    pub fn set(&mut self, i: usize, value: bool) -> bool {
        self.0.set(i, value)
    }
}
