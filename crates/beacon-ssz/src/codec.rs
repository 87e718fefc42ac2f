//! The four operations offered to collaborators.
//!
//! Each is a thin layer over [`SszType`] that records the outcome with
//! `tracing`: rejected input at `debug`, success at `trace`.

use std::fmt;
use std::str::FromStr;

use beacon_ssz_core::{Root, SszType};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Textual surface form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextFormat {
    /// Compact JSON, integers as decimal strings.
    #[default]
    Json,
    /// Single-line YAML flow mapping, as used by `consensus-spec-tests` fixtures.
    Yaml,
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextFormat::Json => f.write_str("json"),
            TextFormat::Yaml => f.write_str("yaml"),
        }
    }
}

impl FromStr for TextFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(TextFormat::Json),
            "yaml" | "yml" => Ok(TextFormat::Yaml),
            other => Err(format!("unknown text format: {other}")),
        }
    }
}

fn shape_name<T: SszType>() -> String {
    T::schema().name()
}

fn rejected<T: SszType>(op: &'static str, err: impl Into<Error>) -> Error {
    let err = err.into();
    debug!(shape = %shape_name::<T>(), op, error = %err, "input rejected");
    err
}

/// Canonical binary encoding of `value`.
pub fn encode<T: SszType>(value: &T) -> Result<Vec<u8>> {
    let bytes = value
        .to_ssz_bytes()
        .map_err(|e| rejected::<T>("encode", e))?;
    trace!(shape = %shape_name::<T>(), len = bytes.len(), "encoded");
    Ok(bytes)
}

/// Decode canonical bytes into a `T`.
pub fn decode<T: SszType>(bytes: &[u8]) -> Result<T> {
    let value = T::from_ssz_bytes(bytes).map_err(|e| rejected::<T>("decode", e))?;
    trace!(shape = %shape_name::<T>(), len = bytes.len(), "decoded");
    Ok(value)
}

/// Hash tree root of `value`.
pub fn digest<T: SszType>(value: &T) -> Result<Root> {
    let root = value
        .hash_tree_root()
        .map_err(|e| rejected::<T>("digest", e))?;
    trace!(shape = %shape_name::<T>(), %root, "digested");
    Ok(root)
}

/// Render `value` in the given textual form.
pub fn to_text<T: SszType>(value: &T, format: TextFormat) -> Result<String> {
    let text = match format {
        TextFormat::Json => value.to_json_string(),
        TextFormat::Yaml => value.to_yaml_string(),
    }
    .map_err(|e| rejected::<T>("to_text", e))?;
    trace!(shape = %shape_name::<T>(), %format, len = text.len(), "rendered");
    Ok(text)
}

/// Parse a `T` from the given textual form.
pub fn from_text<T: SszType>(text: &str, format: TextFormat) -> Result<T> {
    let value = match format {
        TextFormat::Json => T::from_json_str(text),
        TextFormat::Yaml => T::from_yaml_str(text),
    }
    .map_err(|e| rejected::<T>("from_text", e))?;
    trace!(shape = %shape_name::<T>(), %format, "parsed");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_ssz_core::phase0::Checkpoint;
    use beacon_ssz_core::{DecodeError, TextError};

    #[test]
    fn test_text_format_parse() {
        assert_eq!("JSON".parse::<TextFormat>().unwrap(), TextFormat::Json);
        assert_eq!("yml".parse::<TextFormat>().unwrap(), TextFormat::Yaml);
        assert!("toml".parse::<TextFormat>().is_err());
        assert_eq!(TextFormat::Yaml.to_string(), "yaml");
        assert_eq!(TextFormat::default(), TextFormat::Json);
    }

    #[test]
    fn test_checkpoint_operations() {
        let checkpoint = Checkpoint {
            epoch: 3,
            root: Root::from_bytes([0xcc; 32]),
        };
        let bytes = encode(&checkpoint).unwrap();
        assert_eq!(bytes.len(), 40);
        assert_eq!(decode::<Checkpoint>(&bytes).unwrap(), checkpoint);
        assert_eq!(
            digest(&checkpoint).unwrap().to_hex(),
            "e4452df6c55c689ae037b0a24544c6ceafd866a63f5ba03d8fc20de28330a686"
        );

        for format in [TextFormat::Json, TextFormat::Yaml] {
            let text = to_text(&checkpoint, format).unwrap();
            assert_eq!(from_text::<Checkpoint>(&text, format).unwrap(), checkpoint);
        }
    }

    #[test]
    fn test_errors_keep_their_source() {
        assert!(matches!(
            decode::<Checkpoint>(&[0u8; 39]),
            Err(Error::Decode(DecodeError::IncorrectLength { .. }))
        ));
        assert!(matches!(
            from_text::<Checkpoint>("", TextFormat::Yaml),
            Err(Error::Text(TextError::UnexpectedEnd))
        ));
    }
}
