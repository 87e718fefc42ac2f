//! Altair records: the sync aggregate and the block types that carry it.

use crate::bits::BitVector;
use crate::phase0::{
    Attestation, AttesterSlashing, Deposit, Eth1Data, ProposerSlashing, SignedVoluntaryExit,
};
use crate::preset::{
    MAX_ATTESTATIONS, MAX_ATTESTER_SLASHINGS, MAX_DEPOSITS, MAX_PROPOSER_SLASHINGS,
    MAX_VOLUNTARY_EXITS, SYNC_COMMITTEE_SIZE,
};
use crate::types::{BlsSignature, List, Root, Slot, ValidatorIndex};

ssz_container! {
    /// Sync committee participation and its aggregate signature.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct SyncAggregate {
        pub sync_committee_bits: BitVector<SYNC_COMMITTEE_SIZE> => "sync committee bits",
        pub sync_committee_signature: BlsSignature => "sync committee signature",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct BeaconBlockBody {
        pub randao_reveal: BlsSignature => "RANDAO reveal",
        pub eth1_data: Eth1Data => "ETH1 data",
        pub graffiti: [u8; 32] => "graffiti",
        pub proposer_slashings: List<ProposerSlashing, MAX_PROPOSER_SLASHINGS> => "proposer slashings",
        pub attester_slashings: List<AttesterSlashing, MAX_ATTESTER_SLASHINGS> => "attester slashings",
        pub attestations: List<Attestation, MAX_ATTESTATIONS> => "attestations",
        pub deposits: List<Deposit, MAX_DEPOSITS> => "deposits",
        pub voluntary_exits: List<SignedVoluntaryExit, MAX_VOLUNTARY_EXITS> => "voluntary exits",
        pub sync_aggregate: SyncAggregate => "sync aggregate",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct BeaconBlock {
        pub slot: Slot => "slot",
        pub proposer_index: ValidatorIndex => "proposer index",
        pub parent_root: Root => "parent root",
        pub state_root: Root => "state root",
        pub body: BeaconBlockBody => "body",
    }
}

ssz_container! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct SignedBeaconBlock {
        pub message: BeaconBlock => "message",
        pub signature: BlsSignature => "signature",
    }
}
