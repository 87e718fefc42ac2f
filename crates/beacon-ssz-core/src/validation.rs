//! Structural checks of a value against its shape.
//!
//! Run before encoding and hashing so that the codecs themselves can assume
//! a well-formed tree. Only structure is checked: widths, lengths,
//! capacities, field counts and union selectors. No protocol semantics.

use crate::error::{EncodeError, ShapeMismatch};
use crate::schema::{Shape, UintWidth};
use crate::value::Value;

/// Check that `value` is a well-formed instance of `shape`.
pub fn validate_value(value: &Value, shape: &Shape) -> Result<(), EncodeError> {
    match (shape, value) {
        (Shape::Bool, Value::Bool(_))
        | (Shape::Uint(UintWidth::U8), Value::U8(_))
        | (Shape::Uint(UintWidth::U16), Value::U16(_))
        | (Shape::Uint(UintWidth::U32), Value::U32(_))
        | (Shape::Uint(UintWidth::U64), Value::U64(_))
        | (Shape::Uint(UintWidth::U128), Value::U128(_))
        | (Shape::Uint(UintWidth::U256), Value::U256(_)) => Ok(()),

        (Shape::ByteVector(n), Value::Bytes(bytes)) => {
            if bytes.len() != *n {
                return Err(EncodeError::WrongLength {
                    shape: shape.name(),
                    expected: *n,
                    actual: bytes.len(),
                });
            }
            Ok(())
        }

        (Shape::ByteList(max), Value::Bytes(bytes)) => check_max(shape, *max, bytes.len()),

        (Shape::BitVector(n), Value::Bits(bits)) => {
            if bits.len() != *n {
                return Err(EncodeError::WrongLength {
                    shape: shape.name(),
                    expected: *n,
                    actual: bits.len(),
                });
            }
            Ok(())
        }

        (Shape::BitList(max), Value::Bits(bits)) => check_max(shape, *max, bits.len()),

        (Shape::Vector(element, n), Value::List(items)) => {
            if items.len() != *n {
                return Err(EncodeError::WrongLength {
                    shape: shape.name(),
                    expected: *n,
                    actual: items.len(),
                });
            }
            items.iter().try_for_each(|item| validate_value(item, element))
        }

        (Shape::List(element, max), Value::List(items)) => {
            check_max(shape, *max, items.len())?;
            items.iter().try_for_each(|item| validate_value(item, element))
        }

        (Shape::Container(container), Value::Container(fields)) => {
            if fields.len() != container.fields.len() {
                return Err(EncodeError::WrongLength {
                    shape: shape.name(),
                    expected: container.fields.len(),
                    actual: fields.len(),
                });
            }
            container
                .fields
                .iter()
                .zip(fields)
                .try_for_each(|(field, value)| validate_value(value, &field.shape))
        }

        (Shape::Union(variants), Value::Union(selector, inner)) => {
            let variant = variants.get(*selector as usize).ok_or(EncodeError::InvalidSelector {
                selector: *selector,
                variants: variants.len(),
            })?;
            match (variant, inner) {
                (None, None) if *selector == 0 => Ok(()),
                (Some(shape), Some(inner)) => validate_value(inner, shape),
                _ => Err(EncodeError::InvalidSelector {
                    selector: *selector,
                    variants: variants.len(),
                }),
            }
        }

        (shape, value) => Err(ShapeMismatch {
            expected: shape.name(),
            found: value.kind(),
        }
        .into()),
    }
}

fn check_max(shape: &Shape, max: usize, actual: usize) -> Result<(), EncodeError> {
    if actual > max {
        return Err(EncodeError::TooManyElements {
            shape: shape.name(),
            max,
            actual,
        });
    }
    Ok(())
}
