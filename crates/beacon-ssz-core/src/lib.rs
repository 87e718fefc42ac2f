//! # beacon-ssz core
//!
//! Pure primitives for consensus-layer data: type schemas, the canonical
//! binary codec, Merkleization and the JSON/YAML textual forms.
//!
//! This crate contains no I/O and no logging. Every operation is a pure
//! function of its input and the value's [`Shape`].
//!
//! ## Key Types
//!
//! - [`Shape`] - Closed description of a type's layout
//! - [`Value`] - Dynamic value tree every codec operates on
//! - [`SszType`] - Typed front end mapping Rust types onto shapes
//! - [`Root`] - 32-byte hash tree root
//!
//! ## Codecs
//!
//! - [`canonical`] - binary encode/decode with offset tables
//! - [`merkle`] - hash tree roots over 32-byte chunks
//! - [`text`] - JSON and YAML forms as used by `consensus-spec-tests` fixtures

#[macro_use]
pub mod macros;

pub mod altair;
pub mod bits;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod merkle;
pub mod phase0;
pub mod preset;
pub mod schema;
pub mod text;
pub mod types;
pub mod validation;
pub mod value;

pub use bits::{BitList, BitVector, Bits};
pub use canonical::{decode, encode};
pub use error::{
    CapacityError, DecodeError, EncodeError, FieldValueError, MalformedEncoding, ShapeMismatch,
    TextError,
};
pub use merkle::hash_tree_root;
pub use schema::{ContainerShape, Field, Shape, UintWidth};
pub use types::{BlsPubKey, BlsSignature, ByteList, List, Root, SszType, Vector};
pub use validation::validate_value;
pub use value::Value;

pub use ethereum_types::U256;
