//! # beacon-ssz
//!
//! The unified API for consensus-layer data: canonical binary encoding,
//! hash tree roots, and the JSON/YAML forms used by `consensus-spec-tests`.
//!
//! ## Overview
//!
//! Every record is described by a [`Shape`], and every codec dispatches on
//! that shape:
//!
//! - **Binary codec**: little-endian scalars, offset tables for variable fields
//! - **Merkleizer**: 32-byte chunks, zero-padded trees, length mix-ins
//! - **Textual codec**: decimal-string integers, `0x` hex, one-line YAML
//!
//! ## Usage
//!
//! ```rust
//! use beacon_ssz::phase0::DepositMessage;
//! use beacon_ssz::{decode, digest, encode, from_text, to_text, TextFormat};
//!
//! let json = r#"{"pubkey":"0x000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f","withdrawal_credentials":"0x202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f","amount":"32000000000"}"#;
//!
//! let msg: DepositMessage = from_text(json, TextFormat::Json).unwrap();
//! assert_eq!(to_text(&msg, TextFormat::Json).unwrap(), json);
//!
//! let bytes = encode(&msg).unwrap();
//! assert_eq!(decode::<DepositMessage>(&bytes).unwrap(), msg);
//!
//! let root = digest(&msg).unwrap();
//! assert_eq!(
//!     root.to_hex(),
//!     "010aa56097fc6a6a16b8f3dfeec37f6b4116423531b355c3f69b8ad1cbe294bd"
//! );
//! ```
//!
//! ## Declaring records
//!
//! New records are declared with [`ssz_container!`], giving each field its
//! external name and the label used in error messages.
//!
//! ## Re-exports
//!
//! - `beacon_ssz::core` - schemas, values and the dynamic codecs

pub mod codec;
pub mod error;

pub use beacon_ssz_core as core;

pub use codec::{decode, digest, encode, from_text, to_text, TextFormat};
pub use error::{Error, Result};

pub use beacon_ssz_core::{
    altair, phase0, preset, ssz_container, BitList, BitVector, Bits, BlsPubKey, BlsSignature,
    ByteList, List, Root, Shape, SszType, Value, Vector, U256,
};
pub use beacon_ssz_core::{DecodeError, EncodeError, MalformedEncoding, TextError};
