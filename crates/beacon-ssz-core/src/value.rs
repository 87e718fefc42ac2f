//! The dynamic value tree that every codec operates on.
//!
//! A [`Value`] mirrors the shape tree: containers own their field values,
//! sequences own their elements. Values are never shared or mutated by the
//! codecs; encoding and hashing only read them.

use ethereum_types::U256;

use crate::bits::Bits;
use crate::error::ShapeMismatch;

/// An instance of a protocol type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    U256(U256),
    /// Contents of a byte vector or byte list.
    Bytes(Vec<u8>),
    /// Logical bits of a bitvector or bitlist (never the sentinel).
    Bits(Bits),
    /// Elements of a vector or list.
    List(Vec<Value>),
    /// Field values in declared order.
    Container(Vec<Value>),
    /// Selector and, unless the empty alternative was chosen, its value.
    Union(u8, Option<Box<Value>>),
}

impl Value {
    /// Variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::U8(_) => "uint8",
            Self::U16(_) => "uint16",
            Self::U32(_) => "uint32",
            Self::U64(_) => "uint64",
            Self::U128(_) => "uint128",
            Self::U256(_) => "uint256",
            Self::Bytes(_) => "bytes",
            Self::Bits(_) => "bits",
            Self::List(_) => "list",
            Self::Container(_) => "container",
            Self::Union(..) => "union",
        }
    }

    fn mismatch(&self, expected: &'static str) -> ShapeMismatch {
        ShapeMismatch {
            expected: expected.into(),
            found: self.kind(),
        }
    }

    pub fn into_bool(self) -> Result<bool, ShapeMismatch> {
        match self {
            Self::Bool(b) => Ok(b),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn into_u8(self) -> Result<u8, ShapeMismatch> {
        match self {
            Self::U8(n) => Ok(n),
            other => Err(other.mismatch("uint8")),
        }
    }

    pub fn into_u16(self) -> Result<u16, ShapeMismatch> {
        match self {
            Self::U16(n) => Ok(n),
            other => Err(other.mismatch("uint16")),
        }
    }

    pub fn into_u32(self) -> Result<u32, ShapeMismatch> {
        match self {
            Self::U32(n) => Ok(n),
            other => Err(other.mismatch("uint32")),
        }
    }

    pub fn into_u64(self) -> Result<u64, ShapeMismatch> {
        match self {
            Self::U64(n) => Ok(n),
            other => Err(other.mismatch("uint64")),
        }
    }

    pub fn into_u128(self) -> Result<u128, ShapeMismatch> {
        match self {
            Self::U128(n) => Ok(n),
            other => Err(other.mismatch("uint128")),
        }
    }

    pub fn into_u256(self) -> Result<U256, ShapeMismatch> {
        match self {
            Self::U256(n) => Ok(n),
            other => Err(other.mismatch("uint256")),
        }
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, ShapeMismatch> {
        match self {
            Self::Bytes(b) => Ok(b),
            other => Err(other.mismatch("bytes")),
        }
    }

    pub fn into_bits(self) -> Result<Bits, ShapeMismatch> {
        match self {
            Self::Bits(b) => Ok(b),
            other => Err(other.mismatch("bits")),
        }
    }

    pub fn into_list(self) -> Result<Vec<Value>, ShapeMismatch> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(other.mismatch("list")),
        }
    }

    /// Unwrap a container, checking it carries exactly `count` fields.
    pub fn into_container(self, count: usize) -> Result<Vec<Value>, ShapeMismatch> {
        match self {
            Self::Container(fields) if fields.len() == count => Ok(fields),
            Self::Container(fields) => Err(ShapeMismatch {
                expected: format!("container of {count} fields"),
                found: if fields.len() < count {
                    "container with missing fields"
                } else {
                    "container with extra fields"
                },
            }),
            other => Err(other.mismatch("container")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::U64(n)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Bits> for Value {
    fn from(bits: Bits) -> Self {
        Self::Bits(bits)
    }
}
