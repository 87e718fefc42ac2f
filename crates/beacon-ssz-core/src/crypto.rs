//! Hashing primitives for merkleization.
//!
//! The protocol fixes SHA-256 as the tree hash. Every internal node is
//! `SHA-256(left || right)` over two 32-byte chunks.

use sha2::{Digest, Sha256};
use std::sync::OnceLock;

use crate::schema::BYTES_PER_CHUNK;

/// A 32-byte Merkle chunk.
pub type Chunk = [u8; BYTES_PER_CHUNK];

/// Deepest tree the zero-subtree table covers. List limits are bounded by
/// `usize`, so 64 levels is enough for any shape.
pub const MAX_TREE_DEPTH: usize = 64;

/// The all-zero chunk.
pub const ZERO_CHUNK: Chunk = [0u8; BYTES_PER_CHUNK];

/// SHA-256 of arbitrary data.
pub fn hash(data: &[u8]) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 of two concatenated chunks.
pub fn hash_pair(left: &Chunk, right: &Chunk) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Root of a perfect subtree of `2^depth` zero chunks.
///
/// # Panics
///
/// Panics if `depth > MAX_TREE_DEPTH`.
pub fn zero_hash(depth: usize) -> &'static Chunk {
    static TABLE: OnceLock<Vec<Chunk>> = OnceLock::new();
    let table = TABLE.get_or_init(|| {
        let mut table = Vec::with_capacity(MAX_TREE_DEPTH + 1);
        table.push(ZERO_CHUNK);
        for i in 0..MAX_TREE_DEPTH {
            let below = table[i];
            table.push(hash_pair(&below, &below));
        }
        table
    });
    &table[depth]
}
