//! Error type for the facade operations.

use beacon_ssz_core::{DecodeError, EncodeError, TextError};
use thiserror::Error;

/// Errors from any beacon-ssz operation.
///
/// Each variant is transparent, so the message is that of the codec which
/// rejected the input.
#[derive(Debug, Error)]
pub enum Error {
    /// The value does not conform to its shape.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Binary input was rejected.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Textual input was rejected.
    #[error(transparent)]
    Text(#[from] TextError),
}

/// Result type for beacon-ssz operations.
pub type Result<T> = std::result::Result<T, Error>;
