//! Mainnet preset capacities.
//!
//! These fix the maximum lengths of lists and bitlists in the record
//! catalogue, and therefore the Merkle tree depths of those fields. They are
//! protocol constants: changing one changes every affected digest.

pub const MAX_VALIDATORS_PER_COMMITTEE: usize = 2048;
pub const SYNC_COMMITTEE_SIZE: usize = 512;

pub const MAX_PROPOSER_SLASHINGS: usize = 16;
pub const MAX_ATTESTER_SLASHINGS: usize = 2;
pub const MAX_ATTESTATIONS: usize = 128;
pub const MAX_DEPOSITS: usize = 16;
pub const MAX_VOLUNTARY_EXITS: usize = 16;

/// Depth of the deposit contract's Merkle tree. Deposit proofs carry one
/// extra node for the mixed-in deposit count.
pub const DEPOSIT_CONTRACT_TREE_DEPTH: usize = 32;
pub const DEPOSIT_PROOF_LENGTH: usize = DEPOSIT_CONTRACT_TREE_DEPTH + 1;
