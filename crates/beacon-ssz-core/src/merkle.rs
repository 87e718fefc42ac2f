//! Merkleization: reducing a value to its 32-byte hash tree root.
//!
//! Every shape is turned into a list of 32-byte chunks and reduced by
//! [`merkleize`]. Variable-size shapes pad their tree to the capacity
//! declared by the schema (never to anything derived from the value) and
//! then mix in their actual length.

use crate::crypto::{hash_pair, zero_hash, Chunk, MAX_TREE_DEPTH, ZERO_CHUNK};
use crate::error::{EncodeError, ShapeMismatch};
use crate::schema::{Shape, BYTES_PER_CHUNK};
use crate::types::Root;
use crate::validation::validate_value;
use crate::value::Value;

/// Bits packed into one chunk.
const BITS_PER_CHUNK: usize = BYTES_PER_CHUNK * 8;

/// Compute the hash tree root of a value.
pub fn hash_tree_root(value: &Value, shape: &Shape) -> Result<Root, EncodeError> {
    validate_value(value, shape)?;
    tree_root(value, shape).map(Root::from_bytes)
}

fn tree_root(value: &Value, shape: &Shape) -> Result<Chunk, EncodeError> {
    match (shape, value) {
        (Shape::Bool | Shape::Uint(_), _) => {
            let mut chunk = ZERO_CHUNK;
            let bytes = basic_bytes(value)?;
            chunk[..bytes.len()].copy_from_slice(&bytes);
            Ok(chunk)
        }
        (Shape::ByteVector(n), Value::Bytes(bytes)) => {
            merkleize(&pack(bytes), chunk_count(*n, 1))
        }
        (Shape::ByteList(max), Value::Bytes(bytes)) => {
            let root = merkleize(&pack(bytes), chunk_count(*max, 1))?;
            Ok(mix_in_length(&root, bytes.len()))
        }
        (Shape::BitVector(n), Value::Bits(bits)) => {
            merkleize(&pack(bits.as_bytes()), n.div_ceil(BITS_PER_CHUNK))
        }
        (Shape::BitList(max), Value::Bits(bits)) => {
            let root = merkleize(&pack(bits.as_bytes()), max.div_ceil(BITS_PER_CHUNK))?;
            Ok(mix_in_length(&root, bits.len()))
        }
        (Shape::Vector(element, n), Value::List(items)) => sequence_root(items, element, *n),
        (Shape::List(element, max), Value::List(items)) => {
            let root = sequence_root(items, element, *max)?;
            Ok(mix_in_length(&root, items.len()))
        }
        (Shape::Container(container), Value::Container(fields)) => {
            let chunks = container
                .fields
                .iter()
                .zip(fields)
                .map(|(field, value)| tree_root(value, &field.shape))
                .collect::<Result<Vec<_>, _>>()?;
            merkleize(&chunks, chunks.len())
        }
        (Shape::Union(variants), Value::Union(selector, inner)) => {
            let root = match (variants.get(*selector as usize), inner) {
                (Some(Some(variant)), Some(inner)) => tree_root(inner, variant)?,
                _ => ZERO_CHUNK,
            };
            Ok(mix_in_selector(&root, *selector))
        }
        (shape, value) => Err(ShapeMismatch {
            expected: shape.name(),
            found: value.kind(),
        }
        .into()),
    }
}

/// Root of a vector/list body sized to `capacity` elements.
fn sequence_root(items: &[Value], element: &Shape, capacity: usize) -> Result<Chunk, EncodeError> {
    if element.is_basic() {
        let size = element.fixed_size().unwrap_or(BYTES_PER_CHUNK);
        let mut bytes = Vec::with_capacity(items.len() * size);
        for item in items {
            bytes.extend_from_slice(&basic_bytes(item)?);
        }
        merkleize(&pack(&bytes), chunk_count(capacity, size))
    } else {
        let chunks = items
            .iter()
            .map(|item| tree_root(item, element))
            .collect::<Result<Vec<_>, _>>()?;
        merkleize(&chunks, capacity)
    }
}

/// Little-endian bytes of a basic scalar.
fn basic_bytes(value: &Value) -> Result<Vec<u8>, EncodeError> {
    Ok(match value {
        Value::Bool(b) => vec![u8::from(*b)],
        Value::U8(n) => vec![*n],
        Value::U16(n) => n.to_le_bytes().to_vec(),
        Value::U32(n) => n.to_le_bytes().to_vec(),
        Value::U64(n) => n.to_le_bytes().to_vec(),
        Value::U128(n) => n.to_le_bytes().to_vec(),
        Value::U256(n) => {
            let mut out = [0u8; 32];
            n.to_little_endian(&mut out);
            out.to_vec()
        }
        other => {
            return Err(ShapeMismatch {
                expected: "basic scalar".into(),
                found: other.kind(),
            }
            .into())
        }
    })
}

/// Chunks needed for `count` items of `size` bytes each.
fn chunk_count(count: usize, size: usize) -> usize {
    count.saturating_mul(size).div_ceil(BYTES_PER_CHUNK)
}

/// Split bytes into chunks, zero-padding the last one.
pub fn pack(bytes: &[u8]) -> Vec<Chunk> {
    bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|piece| {
            let mut chunk = ZERO_CHUNK;
            chunk[..piece.len()].copy_from_slice(piece);
            chunk
        })
        .collect()
}

/// Reduce chunks to a single root over a tree of `limit` leaves rounded up to
/// a power of two. Missing leaves are zero chunks; whole zero subtrees come
/// from a precomputed table, so the cost depends on `chunks.len()` and the
/// tree depth, not on `limit`.
pub fn merkleize(chunks: &[Chunk], limit: usize) -> Result<Chunk, EncodeError> {
    if chunks.len() > limit {
        return Err(EncodeError::TooManyElements {
            shape: "chunk list".into(),
            max: limit,
            actual: chunks.len(),
        });
    }
    if limit == 0 {
        return Ok(ZERO_CHUNK);
    }

    let depth = limit
        .checked_next_power_of_two()
        .map_or(MAX_TREE_DEPTH, |width| width.trailing_zeros() as usize);
    if chunks.is_empty() {
        return Ok(*zero_hash(depth));
    }

    let mut layer = chunks.to_vec();
    for level in 0..depth {
        if layer.len() % 2 == 1 {
            layer.push(*zero_hash(level));
        }
        layer = layer
            .chunks_exact(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }
    Ok(layer[0])
}

/// Bind a content root to a length: `hash(root || uint256(length))`.
pub fn mix_in_length(root: &Chunk, length: usize) -> Chunk {
    let mut encoded = ZERO_CHUNK;
    encoded[..8].copy_from_slice(&(length as u64).to_le_bytes());
    hash_pair(root, &encoded)
}

/// Bind a union's content root to its selector.
pub fn mix_in_selector(root: &Chunk, selector: u8) -> Chunk {
    let mut encoded = ZERO_CHUNK;
    encoded[0] = selector;
    hash_pair(root, &encoded)
}
