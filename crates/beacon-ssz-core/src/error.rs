//! Error types for beacon-ssz-core.
//!
//! Each codec reports its own family: [`EncodeError`] for values that do not
//! fit their shape, [`DecodeError`] for untrusted wire bytes and
//! [`TextError`] for untrusted JSON/YAML. Low-level causes (hex, integer
//! parsing) are kept as error sources.

use thiserror::Error;

/// A value tree does not match the shape it is being read as.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shape mismatch: expected {expected}, found {found}")]
pub struct ShapeMismatch {
    pub expected: String,
    pub found: &'static str,
}

/// A bounded collection was built with the wrong number of elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("expected exactly {expected} elements, got {actual}")]
    Exact { expected: usize, actual: usize },

    #[error("at most {max} elements allowed, got {actual}")]
    Exceeded { max: usize, actual: usize },
}

impl From<CapacityError> for ShapeMismatch {
    fn from(err: CapacityError) -> Self {
        let expected = match err {
            CapacityError::Exact { expected, .. } => format!("exactly {expected} elements"),
            CapacityError::Exceeded { max, .. } => format!("at most {max} elements"),
        };
        ShapeMismatch {
            expected,
            found: "sequence of another length",
        }
    }
}

/// A value could not be encoded or hashed because it violates its shape.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("malformed value: {0}")]
    ShapeMismatch(#[from] ShapeMismatch),

    #[error("malformed value: {shape} requires {expected} bytes, got {actual}")]
    WrongLength {
        shape: String,
        expected: usize,
        actual: usize,
    },

    #[error("malformed value: {shape} holds at most {max} elements, got {actual}")]
    TooManyElements {
        shape: String,
        max: usize,
        actual: usize,
    },

    #[error("malformed value: union selector {selector} out of range for {variants} alternatives")]
    InvalidSelector { selector: u8, variants: usize },

    #[error("malformed value: {0} bytes cannot be addressed by a 4-byte offset")]
    OffsetOverflow(usize),
}

/// Structural violations of the binary form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedEncoding {
    #[error("offset {offset} precedes previous offset {previous}")]
    OffsetsOutOfOrder { previous: usize, offset: usize },

    #[error("offset {offset} exceeds input length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("first offset {offset} does not match fixed prefix length {expected}")]
    FirstOffsetMismatch { offset: usize, expected: usize },

    #[error("input of {actual} bytes is shorter than its {expected}-byte fixed prefix")]
    Truncated { expected: usize, actual: usize },

    #[error("{len} bytes is not a multiple of element size {size}")]
    NotMultiple { len: usize, size: usize },

    #[error("{actual} elements exceeds maximum of {max}")]
    TooManyElements { max: usize, actual: usize },

    #[error("bitlist missing sentinel bit")]
    MissingSentinel,

    #[error("bit field needs {expected} bytes, got {actual}")]
    BitLength { expected: usize, actual: usize },

    #[error("unused bits set in final byte")]
    UnusedBitsSet,

    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    #[error("union selector {0} out of range")]
    InvalidSelector(u8),

    #[error("empty union alternative followed by {0} bytes")]
    UnionPayload(usize),

    #[error("union encoding is empty")]
    EmptyUnion,
}

/// Binary input could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("incorrect length for {shape}: expected {expected} bytes, got {actual}")]
    IncorrectLength {
        shape: String,
        expected: usize,
        actual: usize,
    },

    #[error("malformed encoding: {0}")]
    Malformed(#[from] MalformedEncoding),

    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),
}

/// Why a present textual field could not be parsed as its declared kind.
#[derive(Debug, Error)]
pub enum FieldValueError {
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),

    #[error(transparent)]
    Integer(#[from] std::num::ParseIntError),

    #[error("invalid decimal: {0}")]
    Decimal(String),

    #[error(transparent)]
    Bits(#[from] MalformedEncoding),
}

/// Textual (JSON/YAML) input could not be decoded.
#[derive(Debug, Error)]
pub enum TextError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("invalid {format}: {message}")]
    MalformedText {
        format: &'static str,
        message: String,
    },

    #[error("{0} missing")]
    MissingField(String),

    #[error("invalid value for {field}: {source}")]
    InvalidFieldValue {
        field: String,
        #[source]
        source: FieldValueError,
    },

    #[error(
        "incorrect length for {field}: {actual} is {}, expected {expected}",
        length_verdict(.expected, .actual)
    )]
    IncorrectLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("incorrect length for {field}: {actual} is too long, maximum {max}")]
    ExceedsMaximum {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),
}

fn length_verdict(expected: &usize, actual: &usize) -> &'static str {
    if actual < expected {
        "too short"
    } else {
        "too long"
    }
}
