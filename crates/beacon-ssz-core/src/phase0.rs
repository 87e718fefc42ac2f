//! Phase 0 records.

use crate::bits::BitList;
use crate::preset::{DEPOSIT_PROOF_LENGTH, MAX_VALIDATORS_PER_COMMITTEE};
use crate::types::{
    BlsPubKey, BlsSignature, CommitteeIndex, Epoch, Gwei, List, Root, Slot, ValidatorIndex, Vector,
};

/// A fork version.
pub type Version = [u8; 4];

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Fork {
        pub previous_version: Version => "previous version",
        pub current_version: Version => "current version",
        pub epoch: Epoch => "epoch",
    }
}

ssz_container! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Checkpoint {
        pub epoch: Epoch => "epoch",
        pub root: Root => "root",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Eth1Data {
        pub deposit_root: Root => "deposit root",
        pub deposit_count: u64 => "deposit count",
        pub block_hash: Root => "block hash",
    }
}

ssz_container! {
    /// The signed portion of a deposit.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct DepositMessage {
        pub pubkey: BlsPubKey => "public key",
        pub withdrawal_credentials: Root => "withdrawal credentials",
        pub amount: Gwei => "amount",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct DepositData {
        pub pubkey: BlsPubKey => "public key",
        pub withdrawal_credentials: Root => "withdrawal credentials",
        pub amount: Gwei => "amount",
        pub signature: BlsSignature => "signature",
    }
}

ssz_container! {
    /// A deposit with its Merkle proof against the deposit contract root.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Deposit {
        pub proof: Vector<Root, DEPOSIT_PROOF_LENGTH> => "proof",
        pub data: DepositData => "data",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct BeaconBlockHeader {
        pub slot: Slot => "slot",
        pub proposer_index: ValidatorIndex => "proposer index",
        pub parent_root: Root => "parent root",
        pub state_root: Root => "state root",
        pub body_root: Root => "body root",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct SignedBeaconBlockHeader {
        pub message: BeaconBlockHeader => "message",
        pub signature: BlsSignature => "signature",
    }
}

ssz_container! {
    /// Two conflicting headers signed by the same proposer for one slot.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct ProposerSlashing {
        pub signed_header_1: SignedBeaconBlockHeader => "signed header 1",
        pub signed_header_2: SignedBeaconBlockHeader => "signed header 2",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct AttestationData {
        pub slot: Slot => "slot",
        pub index: CommitteeIndex => "index",
        pub beacon_block_root: Root => "beacon block root",
        pub source: Checkpoint => "source",
        pub target: Checkpoint => "target",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Attestation {
        pub aggregation_bits: BitList<MAX_VALIDATORS_PER_COMMITTEE> => "aggregation bits",
        pub data: AttestationData => "data",
        pub signature: BlsSignature => "signature",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct IndexedAttestation {
        pub attesting_indices: List<ValidatorIndex, MAX_VALIDATORS_PER_COMMITTEE> => "attesting indices",
        pub data: AttestationData => "data",
        pub signature: BlsSignature => "signature",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct AttesterSlashing {
        pub attestation_1: IndexedAttestation => "attestation 1",
        pub attestation_2: IndexedAttestation => "attestation 2",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct VoluntaryExit {
        pub epoch: Epoch => "epoch",
        pub validator_index: ValidatorIndex => "validator index",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct SignedVoluntaryExit {
        pub message: VoluntaryExit => "message",
        pub signature: BlsSignature => "signature",
    }
}
