//! Strong type definitions for protocol values.
//!
//! Fixed byte sequences are newtypes so a root can never be passed where a
//! public key is expected. Bounded collections check their capacity when
//! built, so a typed value is always well-formed for its shape. Every type
//! implements [`SszType`], which maps it onto the dynamic [`Value`] tree the
//! codecs work on.

use ethereum_types::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use crate::bits::{BitList, BitVector};
use crate::canonical;
use crate::error::{CapacityError, DecodeError, EncodeError, ShapeMismatch, TextError};
use crate::merkle;
use crate::schema::{Shape, UintWidth};
use crate::text;
use crate::value::Value;

pub type Slot = u64;
pub type Epoch = u64;
pub type ValidatorIndex = u64;
pub type CommitteeIndex = u64;
pub type Gwei = u64;

/// A protocol type with a fixed shape.
///
/// Implementors only describe their shape and convert to and from [`Value`];
/// the provided methods route through the shared codecs.
pub trait SszType: Sized {
    /// The shape every value of this type has.
    fn shape() -> Shape;

    /// [`shape`](Self::shape), borrowed from a per-type cache when the
    /// implementor keeps one. Records declared with `ssz_container!` do, so
    /// their shape tree is built once.
    fn schema() -> Cow<'static, Shape> {
        Cow::Owned(Self::shape())
    }

    /// Convert to the dynamic value tree.
    fn to_value(&self) -> Value;

    /// Rebuild from a value tree produced by one of the codecs.
    fn from_value(value: Value) -> Result<Self, ShapeMismatch>;

    /// Canonical binary encoding.
    fn to_ssz_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        canonical::encode(&self.to_value(), &Self::schema())
    }

    /// Decode from the canonical binary encoding.
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value = canonical::decode(bytes, &Self::schema())?;
        Ok(Self::from_value(value)?)
    }

    /// 32-byte Merkle commitment.
    fn hash_tree_root(&self) -> Result<Root, EncodeError> {
        merkle::hash_tree_root(&self.to_value(), &Self::schema())
    }

    fn to_json_string(&self) -> Result<String, EncodeError> {
        text::to_json(&self.to_value(), &Self::schema())
    }

    fn from_json_str(text: &str) -> Result<Self, TextError> {
        let value = text::from_json(text, &Self::schema())?;
        Ok(Self::from_value(value)?)
    }

    /// Single-line YAML flow form, terminated by `\n`.
    fn to_yaml_string(&self) -> Result<String, EncodeError> {
        text::to_yaml(&self.to_value(), &Self::schema())
    }

    fn from_yaml_str(text: &str) -> Result<Self, TextError> {
        let value = text::from_yaml(text, &Self::schema())?;
        Ok(Self::from_value(value)?)
    }
}

// ---------------------------------------------------------------------------
// Fixed byte sequences
// ---------------------------------------------------------------------------

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Length in bytes.
            pub const LEN: usize = $len;

            /// All zero bytes.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Create from raw bytes.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Get the raw bytes.
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Lowercase hex without prefix.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Parse hex, with or without a `0x` prefix.
            pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
                let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))?;
                if bytes.len() != $len {
                    return Err(hex::FromHexError::InvalidStringLength);
                }
                let mut arr = [0u8; $len];
                arr.copy_from_slice(&bytes);
                Ok(Self(arr))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), &self.to_hex()[..16])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", self.to_hex())
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = std::array::TryFromSliceError;

            fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
                let arr: [u8; $len] = slice.try_into()?;
                Ok(Self(arr))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(de::Error::custom)
            }
        }

        impl SszType for $name {
            fn shape() -> Shape {
                Shape::ByteVector($len)
            }

            fn to_value(&self) -> Value {
                Value::Bytes(self.0.to_vec())
            }

            fn from_value(value: Value) -> Result<Self, ShapeMismatch> {
                let bytes = value.into_bytes()?;
                Self::try_from(bytes.as_slice()).map_err(|_| ShapeMismatch {
                    expected: Self::shape().name(),
                    found: "bytes of another length",
                })
            }
        }
    };
}

fixed_bytes!(
    /// A 32-byte Merkle root.
    Root,
    32
);

fixed_bytes!(
    /// A 48-byte compressed BLS12-381 public key. Never validated here.
    BlsPubKey,
    48
);

fixed_bytes!(
    /// A 96-byte compressed BLS12-381 signature. Never validated here.
    BlsSignature,
    96
);

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

macro_rules! uint_type {
    ($ty:ty, $width:ident, $variant:ident, $into:ident) => {
        impl SszType for $ty {
            fn shape() -> Shape {
                Shape::Uint(UintWidth::$width)
            }

            fn to_value(&self) -> Value {
                Value::$variant(*self)
            }

            fn from_value(value: Value) -> Result<Self, ShapeMismatch> {
                value.$into()
            }
        }
    };
}

uint_type!(u8, U8, U8, into_u8);
uint_type!(u16, U16, U16, into_u16);
uint_type!(u32, U32, U32, into_u32);
uint_type!(u64, U64, U64, into_u64);
uint_type!(u128, U128, U128, into_u128);
uint_type!(U256, U256, U256, into_u256);

impl SszType for bool {
    fn shape() -> Shape {
        Shape::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, ShapeMismatch> {
        value.into_bool()
    }
}

impl<const N: usize> SszType for [u8; N] {
    fn shape() -> Shape {
        Shape::ByteVector(N)
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }

    fn from_value(value: Value) -> Result<Self, ShapeMismatch> {
        let bytes = value.into_bytes()?;
        bytes.try_into().map_err(|_| ShapeMismatch {
            expected: format!("{N} bytes"),
            found: "bytes of another length",
        })
    }
}

// ---------------------------------------------------------------------------
// Bounded collections
// ---------------------------------------------------------------------------

/// Up to `N` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteList<const N: usize>(Vec<u8>);

impl<const N: usize> ByteList<N> {
    pub fn new(bytes: Vec<u8>) -> Result<Self, CapacityError> {
        if bytes.len() > N {
            return Err(CapacityError::Exceeded {
                max: N,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl<const N: usize> Deref for ByteList<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> TryFrom<Vec<u8>> for ByteList<N> {
    type Error = CapacityError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl<const N: usize> SszType for ByteList<N> {
    fn shape() -> Shape {
        Shape::ByteList(N)
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.0.clone())
    }

    fn from_value(value: Value) -> Result<Self, ShapeMismatch> {
        Ok(Self::new(value.into_bytes()?)?)
    }
}

impl<const N: usize> SszType for BitVector<N> {
    fn shape() -> Shape {
        Shape::BitVector(N)
    }

    fn to_value(&self) -> Value {
        Value::Bits(self.bits().clone())
    }

    fn from_value(value: Value) -> Result<Self, ShapeMismatch> {
        Ok(Self::from_bits(value.into_bits()?)?)
    }
}

impl<const N: usize> SszType for BitList<N> {
    fn shape() -> Shape {
        Shape::BitList(N)
    }

    fn to_value(&self) -> Value {
        Value::Bits(self.bits().clone())
    }

    fn from_value(value: Value) -> Result<Self, ShapeMismatch> {
        Ok(Self::from_bits(value.into_bits()?)?)
    }
}

/// Exactly `N` elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vector<T, const N: usize>(Vec<T>);

impl<T, const N: usize> Vector<T, N> {
    pub fn new(items: Vec<T>) -> Result<Self, CapacityError> {
        if items.len() != N {
            return Err(CapacityError::Exact {
                expected: N,
                actual: items.len(),
            });
        }
        Ok(Self(items))
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: Default, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self((0..N).map(|_| T::default()).collect())
    }
}

impl<T, const N: usize> Deref for Vector<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const N: usize> TryFrom<Vec<T>> for Vector<T, N> {
    type Error = CapacityError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl<T: SszType, const N: usize> SszType for Vector<T, N> {
    fn shape() -> Shape {
        Shape::vector(T::schema().into_owned(), N)
    }

    fn to_value(&self) -> Value {
        Value::List(self.0.iter().map(T::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ShapeMismatch> {
        let items = value
            .into_list()?
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(items)?)
    }
}

/// Up to `N` elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct List<T, const N: usize>(Vec<T>);

impl<T, const N: usize> List<T, N> {
    pub fn new(items: Vec<T>) -> Result<Self, CapacityError> {
        if items.len() > N {
            return Err(CapacityError::Exceeded {
                max: N,
                actual: items.len(),
            });
        }
        Ok(Self(items))
    }

    /// Append an element if capacity allows.
    pub fn push(&mut self, item: T) -> Result<(), CapacityError> {
        if self.0.len() >= N {
            return Err(CapacityError::Exceeded {
                max: N,
                actual: self.0.len() + 1,
            });
        }
        self.0.push(item);
        Ok(())
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T, const N: usize> Default for List<T, N> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T, const N: usize> Deref for List<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const N: usize> TryFrom<Vec<T>> for List<T, N> {
    type Error = CapacityError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl<T: SszType, const N: usize> SszType for List<T, N> {
    fn shape() -> Shape {
        Shape::list(T::schema().into_owned(), N)
    }

    fn to_value(&self) -> Value {
        Value::List(self.0.iter().map(T::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ShapeMismatch> {
        let items = value
            .into_list()?
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(items)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_hex_roundtrip() {
        let root = Root::from_bytes([0x42; 32]);
        let recovered = Root::from_hex(&root.to_hex()).unwrap();
        assert_eq!(root, recovered);
        assert_eq!(Root::from_hex(&root.to_string()).unwrap(), root);
        assert!(Root::from_hex("0x1234").is_err());
    }

    #[test]
    fn test_root_display_and_debug() {
        let root = Root::from_bytes([0xab; 32]);
        assert_eq!(root.to_string(), format!("0x{}", "ab".repeat(32)));
        assert_eq!(format!("{root:?}"), "Root(0xabababababababab)");
    }

    #[test]
    fn test_pubkey_try_from_slice() {
        let bytes = [7u8; 48];
        assert_eq!(BlsPubKey::try_from(&bytes[..]).unwrap().as_bytes(), &bytes);
        assert!(BlsPubKey::try_from(&bytes[..47]).is_err());
    }

    #[test]
    fn test_newtype_serde_as_hex() {
        let sig = BlsSignature::from_bytes([1; 96]);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "01".repeat(96)));
        let back: BlsSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn test_scalar_ssz() {
        assert_eq!(0x0102u16.to_ssz_bytes().unwrap(), vec![0x02, 0x01]);
        assert_eq!(u64::from_ssz_bytes(&[1, 0, 0, 0, 0, 0, 0, 0]).unwrap(), 1);
        assert!(u64::from_ssz_bytes(&[1, 0, 0]).is_err());
        assert!(bool::from_ssz_bytes(&[2]).is_err());
        assert_eq!(U256::from(5u64).to_json_string().unwrap(), "\"5\"");
    }

    #[test]
    fn test_list_capacity() {
        let mut list = List::<u64, 2>::default();
        list.push(1).unwrap();
        list.push(2).unwrap();
        assert_eq!(list.push(3), Err(CapacityError::Exceeded { max: 2, actual: 3 }));
        assert_eq!(&*list, &[1, 2]);

        assert!(List::<u64, 2>::new(vec![1, 2, 3]).is_err());
        assert!(Vector::<u8, 3>::new(vec![1, 2]).is_err());
        assert_eq!(Vector::<u8, 3>::default().len(), 3);
    }

    #[test]
    fn test_list_rejects_oversized_decode() {
        // Three uint64 values against a capacity of two.
        let bytes = [1u8, 0, 0, 0, 0, 0, 0, 0].repeat(3);
        assert!(List::<u64, 2>::from_ssz_bytes(&bytes).is_err());
        assert_eq!(List::<u64, 3>::from_ssz_bytes(&bytes).unwrap().len(), 3);
    }

    #[test]
    fn test_byte_list_text() {
        let list = ByteList::<4>::new(vec![0xde, 0xad]).unwrap();
        assert_eq!(list.to_json_string().unwrap(), "\"0xdead\"");
        assert_eq!(ByteList::<4>::from_json_str("\"dead\"").unwrap(), list);
        assert!(ByteList::<4>::from_json_str("\"0x0102030405\"").is_err());
    }
}
