//! Canonical binary encoding.
//!
//! Layout rules:
//! - Scalars are fixed-width little-endian; booleans are one byte, 0 or 1
//! - Byte vectors and bitvectors are emitted verbatim
//! - Bitlists carry one sentinel bit after the last logical bit
//! - Composites (containers, and sequences of variable-size elements) write
//!   a fixed prefix holding fixed-size parts inline and a 4-byte
//!   little-endian offset for each variable-size part, followed by the
//!   variable-size parts in order
//!
//! The encoding is canonical: [`decode`] accepts exactly one byte string per
//! value, so `encode(decode(b)) == b` for every accepted `b`.

use ethereum_types::U256;

use crate::bits::Bits;
use crate::error::{DecodeError, EncodeError, MalformedEncoding, ShapeMismatch};
use crate::schema::{Shape, UintWidth, BYTES_PER_OFFSET};
use crate::validation::validate_value;
use crate::value::Value;

/// Encode a value to its canonical bytes.
///
/// The value is validated against `shape` first; a malformed value is
/// rejected before any bytes are produced.
pub fn encode(value: &Value, shape: &Shape) -> Result<Vec<u8>, EncodeError> {
    validate_value(value, shape)?;
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value, shape)?;
    Ok(buf)
}

/// Recursively encode a validated value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value, shape: &Shape) -> Result<(), EncodeError> {
    match (shape, value) {
        (_, Value::Bool(b)) => buf.push(u8::from(*b)),
        (_, Value::U8(n)) => buf.push(*n),
        (_, Value::U16(n)) => buf.extend_from_slice(&n.to_le_bytes()),
        (_, Value::U32(n)) => buf.extend_from_slice(&n.to_le_bytes()),
        (_, Value::U64(n)) => buf.extend_from_slice(&n.to_le_bytes()),
        (_, Value::U128(n)) => buf.extend_from_slice(&n.to_le_bytes()),
        (_, Value::U256(n)) => {
            let mut out = [0u8; 32];
            n.to_little_endian(&mut out);
            buf.extend_from_slice(&out);
        }
        (_, Value::Bytes(bytes)) => buf.extend_from_slice(bytes),
        (Shape::BitList(_), Value::Bits(bits)) => buf.extend_from_slice(&bits.to_bitlist_bytes()),
        (_, Value::Bits(bits)) => buf.extend_from_slice(bits.as_bytes()),
        (Shape::Vector(element, _) | Shape::List(element, _), Value::List(items)) => {
            if element.is_fixed_size() {
                for item in items {
                    encode_value_to(buf, item, element)?;
                }
            } else {
                encode_composite(buf, items.iter().map(|item| (item, &**element)))?;
            }
        }
        (Shape::Container(container), Value::Container(fields)) => {
            encode_composite(
                buf,
                fields.iter().zip(container.fields.iter().map(|f| &f.shape)),
            )?;
        }
        (Shape::Union(variants), Value::Union(selector, inner)) => {
            buf.push(*selector);
            if let (Some(Some(variant)), Some(inner)) = (variants.get(*selector as usize), inner) {
                encode_value_to(buf, inner, variant)?;
            }
        }
        (shape, value) => {
            return Err(ShapeMismatch {
                expected: shape.name(),
                found: value.kind(),
            }
            .into())
        }
    }
    Ok(())
}

/// Encode parts with the offset-table layout.
///
/// Two passes: every part is encoded first so that all variable-size
/// lengths are known, then the prefix (inline fixed parts and offsets) and
/// the variable-size bodies are written.
fn encode_composite<'a>(
    buf: &mut Vec<u8>,
    parts: impl Iterator<Item = (&'a Value, &'a Shape)>,
) -> Result<(), EncodeError> {
    let mut encoded = Vec::new();
    for (value, shape) in parts {
        let mut part = Vec::new();
        encode_value_to(&mut part, value, shape)?;
        encoded.push((shape.is_fixed_size(), part));
    }

    let prefix_len: usize = encoded
        .iter()
        .map(|(fixed, part)| if *fixed { part.len() } else { BYTES_PER_OFFSET })
        .sum();

    let mut offset = prefix_len;
    for (fixed, part) in &encoded {
        if *fixed {
            buf.extend_from_slice(part);
        } else {
            let le = u32::try_from(offset).map_err(|_| EncodeError::OffsetOverflow(offset))?;
            buf.extend_from_slice(&le.to_le_bytes());
            offset += part.len();
        }
    }
    for (fixed, part) in encoded {
        if !fixed {
            buf.extend_from_slice(&part);
        }
    }
    Ok(())
}

/// Decode canonical bytes into a value of the given shape.
pub fn decode(bytes: &[u8], shape: &Shape) -> Result<Value, DecodeError> {
    match shape {
        Shape::Bool => {
            expect_len(bytes, 1, shape)?;
            match bytes[0] {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                b => Err(MalformedEncoding::InvalidBool(b).into()),
            }
        }
        Shape::Uint(width) => {
            expect_len(bytes, width.bytes(), shape)?;
            Ok(match width {
                UintWidth::U8 => Value::U8(bytes[0]),
                UintWidth::U16 => Value::U16(u16::from_le_bytes(le_array(bytes))),
                UintWidth::U32 => Value::U32(u32::from_le_bytes(le_array(bytes))),
                UintWidth::U64 => Value::U64(u64::from_le_bytes(le_array(bytes))),
                UintWidth::U128 => Value::U128(u128::from_le_bytes(le_array(bytes))),
                UintWidth::U256 => Value::U256(U256::from_little_endian(bytes)),
            })
        }
        Shape::ByteVector(n) => {
            expect_len(bytes, *n, shape)?;
            Ok(Value::Bytes(bytes.to_vec()))
        }
        Shape::ByteList(max) => {
            check_count(bytes.len(), *max)?;
            Ok(Value::Bytes(bytes.to_vec()))
        }
        Shape::BitVector(n) => {
            expect_len(bytes, n.div_ceil(8), shape)?;
            Ok(Value::Bits(Bits::from_packed(bytes.to_vec(), *n)?))
        }
        Shape::BitList(max) => Ok(Value::Bits(Bits::from_bitlist_bytes(bytes, *max)?)),
        Shape::Vector(element, n) => decode_vector(bytes, element, *n, shape),
        Shape::List(element, max) => decode_list(bytes, element, *max),
        Shape::Container(container) => {
            let shapes: Vec<&Shape> = container.fields.iter().map(|f| &f.shape).collect();
            if let Some(size) = shape.fixed_size() {
                expect_len(bytes, size, shape)?;
            }
            let parts = split_composite(bytes, &shapes)?;
            let fields = parts
                .into_iter()
                .zip(shapes)
                .map(|(part, shape)| decode(part, shape))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Container(fields))
        }
        Shape::Union(variants) => {
            let (&selector, rest) = bytes.split_first().ok_or(MalformedEncoding::EmptyUnion)?;
            match variants.get(selector as usize) {
                Some(None) if selector == 0 => {
                    if !rest.is_empty() {
                        return Err(MalformedEncoding::UnionPayload(rest.len()).into());
                    }
                    Ok(Value::Union(0, None))
                }
                Some(Some(variant)) => {
                    let inner = decode(rest, variant)?;
                    Ok(Value::Union(selector, Some(Box::new(inner))))
                }
                _ => Err(MalformedEncoding::InvalidSelector(selector).into()),
            }
        }
    }
}

fn decode_vector(
    bytes: &[u8],
    element: &Shape,
    n: usize,
    shape: &Shape,
) -> Result<Value, DecodeError> {
    let items = match element.fixed_size() {
        Some(size) => {
            expect_len(bytes, size * n, shape)?;
            split_fixed(bytes, size, n)
                .into_iter()
                .map(|part| decode(part, element))
                .collect::<Result<Vec<_>, _>>()?
        }
        None => {
            let shapes = vec![element; n];
            split_composite(bytes, &shapes)?
                .into_iter()
                .map(|part| decode(part, element))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(Value::List(items))
}

fn decode_list(bytes: &[u8], element: &Shape, max: usize) -> Result<Value, DecodeError> {
    let items = match element.fixed_size() {
        Some(0) => {
            if !bytes.is_empty() {
                return Err(MalformedEncoding::NotMultiple {
                    len: bytes.len(),
                    size: 0,
                }
                .into());
            }
            Vec::new()
        }
        Some(size) => {
            if bytes.len() % size != 0 {
                return Err(MalformedEncoding::NotMultiple {
                    len: bytes.len(),
                    size,
                }
                .into());
            }
            let count = bytes.len() / size;
            check_count(count, max)?;
            split_fixed(bytes, size, count)
                .into_iter()
                .map(|part| decode(part, element))
                .collect::<Result<Vec<_>, _>>()?
        }
        None if bytes.is_empty() => Vec::new(),
        None => {
            // The first offset also tells how many offsets the prefix holds.
            let first = read_offset(bytes, 0)?;
            if first == 0 || first % BYTES_PER_OFFSET != 0 {
                return Err(MalformedEncoding::FirstOffsetMismatch {
                    offset: first,
                    expected: BYTES_PER_OFFSET * (first / BYTES_PER_OFFSET).max(1),
                }
                .into());
            }
            let count = first / BYTES_PER_OFFSET;
            check_count(count, max)?;
            if first > bytes.len() {
                return Err(MalformedEncoding::OffsetOutOfRange {
                    offset: first,
                    len: bytes.len(),
                }
                .into());
            }
            let shapes = vec![element; count];
            split_composite(bytes, &shapes)?
                .into_iter()
                .map(|part| decode(part, element))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(Value::List(items))
}

/// Slice `count` consecutive parts of `size` bytes each.
fn split_fixed(bytes: &[u8], size: usize, count: usize) -> Vec<&[u8]> {
    if size == 0 {
        return vec![&bytes[..0]; count];
    }
    bytes.chunks(size).collect()
}

/// Slice a composite encoding into one byte range per part.
///
/// Fixed-size parts are read inline from the prefix; variable-size parts are
/// located through their offsets, which must start right after the prefix,
/// never decrease and never point past the end of the input.
fn split_composite<'a>(bytes: &'a [u8], shapes: &[&Shape]) -> Result<Vec<&'a [u8]>, DecodeError> {
    let prefix_len: usize = shapes.iter().map(|s| s.prefix_size()).sum();
    if bytes.len() < prefix_len {
        return Err(MalformedEncoding::Truncated {
            expected: prefix_len,
            actual: bytes.len(),
        }
        .into());
    }

    enum Part<'a> {
        Fixed(&'a [u8]),
        Variable(usize),
    }

    let mut parts = Vec::with_capacity(shapes.len());
    let mut offsets = Vec::new();
    let mut pos = 0;
    for shape in shapes {
        match shape.fixed_size() {
            Some(size) => {
                parts.push(Part::Fixed(&bytes[pos..pos + size]));
                pos += size;
            }
            None => {
                let offset = read_offset(bytes, pos)?;
                match offsets.last() {
                    None if offset != prefix_len => {
                        return Err(MalformedEncoding::FirstOffsetMismatch {
                            offset,
                            expected: prefix_len,
                        }
                        .into());
                    }
                    Some(&previous) if offset < previous => {
                        return Err(MalformedEncoding::OffsetsOutOfOrder { previous, offset }.into());
                    }
                    _ => {}
                }
                if offset > bytes.len() {
                    return Err(MalformedEncoding::OffsetOutOfRange {
                        offset,
                        len: bytes.len(),
                    }
                    .into());
                }
                parts.push(Part::Variable(offsets.len()));
                offsets.push(offset);
                pos += BYTES_PER_OFFSET;
            }
        }
    }

    if offsets.is_empty() && bytes.len() != prefix_len {
        return Err(MalformedEncoding::Truncated {
            expected: prefix_len,
            actual: bytes.len(),
        }
        .into());
    }

    Ok(parts
        .into_iter()
        .map(|part| match part {
            Part::Fixed(slice) => slice,
            Part::Variable(i) => {
                let end = offsets.get(i + 1).copied().unwrap_or(bytes.len());
                &bytes[offsets[i]..end]
            }
        })
        .collect())
}

fn read_offset(bytes: &[u8], pos: usize) -> Result<usize, DecodeError> {
    let raw = bytes
        .get(pos..pos + BYTES_PER_OFFSET)
        .ok_or(MalformedEncoding::Truncated {
            expected: pos + BYTES_PER_OFFSET,
            actual: bytes.len(),
        })?;
    Ok(u32::from_le_bytes(le_array(raw)) as usize)
}

fn expect_len(bytes: &[u8], expected: usize, shape: &Shape) -> Result<(), DecodeError> {
    if bytes.len() != expected {
        return Err(DecodeError::IncorrectLength {
            shape: shape.name(),
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn check_count(actual: usize, max: usize) -> Result<(), DecodeError> {
    if actual > max {
        return Err(MalformedEncoding::TooManyElements { max, actual }.into());
    }
    Ok(())
}

/// Copy a slice already checked to hold exactly `N` bytes.
fn le_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ContainerShape, Field};

    fn u16_shape() -> Shape {
        Shape::Uint(UintWidth::U16)
    }

    fn u64_shape() -> Shape {
        Shape::Uint(UintWidth::U64)
    }

    /// `{a: uint16, b: List[uint16, 4], c: uint8}`: one offset in the prefix.
    fn mixed_shape() -> Shape {
        Shape::Container(ContainerShape::new(
            "Mixed",
            vec![
                Field::new("a", "a", u16_shape()),
                Field::new("b", "b", Shape::list(u16_shape(), 4)),
                Field::new("c", "c", Shape::Uint(UintWidth::U8)),
            ],
        ))
    }

    fn mixed_value() -> Value {
        Value::Container(vec![
            Value::U16(0x0201),
            Value::List(vec![Value::U16(0xaabb), Value::U16(0xccdd)]),
            Value::U8(0xff),
        ])
    }

    #[test]
    fn test_scalar_encoding() {
        assert_eq!(encode(&Value::U64(1), &u64_shape()).unwrap(), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encode(&Value::U16(0x0102), &u16_shape()).unwrap(), [0x02, 0x01]);
        assert_eq!(encode(&Value::Bool(true), &Shape::Bool).unwrap(), [1]);

        let mut n = [0u8; 32];
        n[0] = 5;
        n[31] = 7;
        let value = Value::U256(U256::from_little_endian(&n));
        assert_eq!(encode(&value, &Shape::Uint(UintWidth::U256)).unwrap(), n);
    }

    #[test]
    fn test_container_offsets() {
        let bytes = encode(&mixed_value(), &mixed_shape()).unwrap();
        // prefix: a (2) + offset (4) + c (1) = 7
        assert_eq!(
            bytes,
            vec![0x01, 0x02, 7, 0, 0, 0, 0xff, 0xbb, 0xaa, 0xdd, 0xcc]
        );
        assert_eq!(decode(&bytes, &mixed_shape()).unwrap(), mixed_value());
    }

    #[test]
    fn test_list_of_variable_elements() {
        let shape = Shape::list(Shape::ByteList(4), 3);
        let value = Value::List(vec![
            Value::Bytes(vec![1, 2]),
            Value::Bytes(vec![]),
            Value::Bytes(vec![3]),
        ]);
        let bytes = encode(&value, &shape).unwrap();
        assert_eq!(bytes, vec![12, 0, 0, 0, 14, 0, 0, 0, 14, 0, 0, 0, 1, 2, 3]);
        assert_eq!(decode(&bytes, &shape).unwrap(), value);

        assert_eq!(decode(&[], &shape).unwrap(), Value::List(vec![]));
    }

    #[test]
    fn test_encode_rejects_malformed_value() {
        let err = encode(&Value::Bytes(vec![0; 47]), &Shape::ByteVector(48)).unwrap_err();
        assert!(matches!(err, EncodeError::WrongLength { expected: 48, actual: 47, .. }));
    }

    #[test]
    fn test_fixed_length_boundaries() {
        let shape = Shape::ByteVector(48);
        for len in [47, 49] {
            assert!(matches!(
                decode(&vec![0; len], &shape),
                Err(DecodeError::IncorrectLength { expected: 48, .. })
            ));
        }
        assert!(matches!(
            decode(&[0; 7], &u64_shape()),
            Err(DecodeError::IncorrectLength { expected: 8, actual: 7, .. })
        ));
    }

    #[test]
    fn test_decreasing_offsets_rejected() {
        let shape = Shape::Container(ContainerShape::new(
            "Two",
            vec![
                Field::new("x", "x", Shape::ByteList(8)),
                Field::new("y", "y", Shape::ByteList(8)),
            ],
        ));
        // offsets 8 then 6
        let bytes = [8, 0, 0, 0, 6, 0, 0, 0, 1, 2];
        assert!(matches!(
            decode(&bytes, &shape),
            Err(DecodeError::Malformed(MalformedEncoding::OffsetsOutOfOrder { previous: 8, offset: 6 }))
        ));
    }

    #[test]
    fn test_offset_past_end_rejected() {
        let mut bytes = encode(&mixed_value(), &mixed_shape()).unwrap();
        bytes[2] = 0xf0;
        assert!(matches!(
            decode(&bytes, &mixed_shape()),
            Err(DecodeError::Malformed(MalformedEncoding::FirstOffsetMismatch { .. }))
        ));

        let shape = Shape::Container(ContainerShape::new(
            "Two",
            vec![
                Field::new("x", "x", Shape::ByteList(8)),
                Field::new("y", "y", Shape::ByteList(8)),
            ],
        ));
        let bytes = [8, 0, 0, 0, 40, 0, 0, 0, 1, 2];
        assert!(matches!(
            decode(&bytes, &shape),
            Err(DecodeError::Malformed(MalformedEncoding::OffsetOutOfRange { offset: 40, len: 10 }))
        ));
    }

    #[test]
    fn test_truncated_prefix() {
        assert!(matches!(
            decode(&[1, 2, 3], &mixed_shape()),
            Err(DecodeError::Malformed(MalformedEncoding::Truncated { expected: 7, actual: 3 }))
        ));
    }

    #[test]
    fn test_list_fixed_elements() {
        let shape = Shape::list(u16_shape(), 2);
        assert!(matches!(
            decode(&[1, 2, 3], &shape),
            Err(DecodeError::Malformed(MalformedEncoding::NotMultiple { len: 3, size: 2 }))
        ));
        assert!(matches!(
            decode(&[1, 2, 3, 4, 5, 6], &shape),
            Err(DecodeError::Malformed(MalformedEncoding::TooManyElements { max: 2, actual: 3 }))
        ));
    }

    #[test]
    fn test_bool_must_be_canonical() {
        assert!(matches!(
            decode(&[2], &Shape::Bool),
            Err(DecodeError::Malformed(MalformedEncoding::InvalidBool(2)))
        ));
    }

    #[test]
    fn test_bitvector_unused_bits() {
        assert!(decode(&[0x0f], &Shape::BitVector(4)).is_ok());
        assert!(matches!(
            decode(&[0x1f], &Shape::BitVector(4)),
            Err(DecodeError::Malformed(MalformedEncoding::UnusedBitsSet))
        ));
    }

    #[test]
    fn test_union() {
        let shape = Shape::Union(vec![None, Some(u16_shape())]);
        let some = Value::Union(1, Some(Box::new(Value::U16(0x0102))));
        assert_eq!(encode(&some, &shape).unwrap(), vec![1, 0x02, 0x01]);
        assert_eq!(decode(&[1, 0x02, 0x01], &shape).unwrap(), some);

        assert_eq!(encode(&Value::Union(0, None), &shape).unwrap(), vec![0]);
        assert!(matches!(
            decode(&[0, 1], &shape),
            Err(DecodeError::Malformed(MalformedEncoding::UnionPayload(1)))
        ));
        assert!(matches!(
            decode(&[2], &shape),
            Err(DecodeError::Malformed(MalformedEncoding::InvalidSelector(2)))
        ));
    }

    #[test]
    fn test_variable_list_first_offset() {
        let shape = Shape::list(Shape::ByteList(4), 8);
        // first offset 5 is not a multiple of 4
        assert!(matches!(
            decode(&[5, 0, 0, 0, 0], &shape),
            Err(DecodeError::Malformed(MalformedEncoding::FirstOffsetMismatch { .. }))
        ));
        // first offset points past the input
        assert!(matches!(
            decode(&[8, 0, 0, 0], &shape),
            Err(DecodeError::Malformed(MalformedEncoding::OffsetOutOfRange { .. }))
        ));
    }
}
