//! Proptest generators for property-based testing.
//!
//! [`shape`] and [`value_for`] drive the dynamic engine with arbitrary
//! nested schemas; the remaining strategies build typed records.

use proptest::prelude::*;
use proptest::strategy::Union;

use beacon_ssz_core::altair::SyncAggregate;
use beacon_ssz_core::phase0::{
    Attestation, AttestationData, BeaconBlockHeader, Checkpoint, DepositMessage,
    IndexedAttestation, SignedBeaconBlockHeader, SignedVoluntaryExit, VoluntaryExit,
};
use beacon_ssz_core::preset::MAX_VALIDATORS_PER_COMMITTEE;
use beacon_ssz_core::{
    BitList, BitVector, Bits, BlsPubKey, BlsSignature, ContainerShape, Field, List, Root, Shape,
    UintWidth, Value, U256,
};

/// Field names for generated containers.
const FIELD_NAMES: [&str; 4] = ["f0", "f1", "f2", "f3"];

/// Largest list capacity that still generates full lists.
const SMALL_CAPACITY: usize = 6;

pub fn uint_width() -> impl Strategy<Value = UintWidth> {
    prop_oneof![
        Just(UintWidth::U8),
        Just(UintWidth::U16),
        Just(UintWidth::U32),
        Just(UintWidth::U64),
        Just(UintWidth::U128),
        Just(UintWidth::U256),
    ]
}

/// Arbitrary nested shapes, a few levels deep.
///
/// List capacities are either small or very large, so that both dense and
/// mostly-padding Merkle trees are covered.
pub fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        Just(Shape::Bool),
        uint_width().prop_map(Shape::Uint),
        (1usize..=48).prop_map(Shape::ByteVector),
        (0usize..=64).prop_map(Shape::ByteList),
        (1usize..=40).prop_map(Shape::BitVector),
        (0usize..=40).prop_map(Shape::BitList),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), 1usize..=4).prop_map(|(element, n)| Shape::vector(element, n)),
            (
                inner.clone(),
                prop_oneof![0usize..=SMALL_CAPACITY, Just(1usize << 20)]
            )
                .prop_map(|(element, max)| Shape::list(element, max)),
            prop::collection::vec(inner.clone(), 1..=FIELD_NAMES.len()).prop_map(container_of),
            prop::collection::vec(inner, 1..=3).prop_map(|alternatives| {
                Shape::Union(
                    std::iter::once(None)
                        .chain(alternatives.into_iter().map(Some))
                        .collect(),
                )
            }),
        ]
    })
}

fn container_of(shapes: Vec<Shape>) -> Shape {
    let fields = FIELD_NAMES
        .iter()
        .zip(shapes)
        .map(|(name, shape)| Field::new(name, name, shape))
        .collect();
    Shape::Container(ContainerShape::new("Generated", fields))
}

fn uint_value(width: UintWidth) -> BoxedStrategy<Value> {
    match width {
        UintWidth::U8 => any::<u8>().prop_map(Value::U8).boxed(),
        UintWidth::U16 => any::<u16>().prop_map(Value::U16).boxed(),
        UintWidth::U32 => any::<u32>().prop_map(Value::U32).boxed(),
        UintWidth::U64 => any::<u64>().prop_map(Value::U64).boxed(),
        UintWidth::U128 => any::<u128>().prop_map(Value::U128).boxed(),
        UintWidth::U256 => any::<[u8; 32]>()
            .prop_map(|bytes| Value::U256(U256::from_little_endian(&bytes)))
            .boxed(),
    }
}

/// Well-formed values of `shape`.
pub fn value_for(shape: &Shape) -> BoxedStrategy<Value> {
    match shape {
        Shape::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        Shape::Uint(width) => uint_value(*width),
        Shape::ByteVector(n) => prop::collection::vec(any::<u8>(), *n)
            .prop_map(Value::Bytes)
            .boxed(),
        Shape::ByteList(max) => prop::collection::vec(any::<u8>(), 0..=*max)
            .prop_map(Value::Bytes)
            .boxed(),
        Shape::BitVector(n) => prop::collection::vec(any::<bool>(), *n)
            .prop_map(|bits| Value::Bits(Bits::from_bools(&bits)))
            .boxed(),
        Shape::BitList(max) => prop::collection::vec(any::<bool>(), 0..=*max)
            .prop_map(|bits| Value::Bits(Bits::from_bools(&bits)))
            .boxed(),
        Shape::Vector(element, n) => prop::collection::vec(value_for(element), *n)
            .prop_map(Value::List)
            .boxed(),
        Shape::List(element, max) => {
            prop::collection::vec(value_for(element), 0..=(*max).min(SMALL_CAPACITY))
                .prop_map(Value::List)
                .boxed()
        }
        Shape::Container(container) => container
            .fields
            .iter()
            .map(|field| value_for(&field.shape))
            .collect::<Vec<_>>()
            .prop_map(Value::Container)
            .boxed(),
        Shape::Union(variants) => Union::new(variants.iter().enumerate().map(|(i, variant)| {
            let selector = i as u8;
            match variant {
                Some(shape) => value_for(shape)
                    .prop_map(move |inner| Value::Union(selector, Some(Box::new(inner))))
                    .boxed(),
                None => Just(Value::Union(selector, None)).boxed(),
            }
        }))
        .boxed(),
    }
}

/// A shape paired with one of its values.
pub fn shape_and_value() -> impl Strategy<Value = (Shape, Value)> {
    shape().prop_flat_map(|shape| {
        let value = value_for(&shape);
        (Just(shape), value)
    })
}

pub fn root() -> impl Strategy<Value = Root> {
    any::<[u8; 32]>().prop_map(Root::from_bytes)
}

pub fn pubkey() -> impl Strategy<Value = BlsPubKey> {
    prop::collection::vec(any::<u8>(), BlsPubKey::LEN).prop_map(|bytes| {
        let mut arr = [0u8; BlsPubKey::LEN];
        arr.copy_from_slice(&bytes);
        BlsPubKey::from_bytes(arr)
    })
}

pub fn signature() -> impl Strategy<Value = BlsSignature> {
    prop::collection::vec(any::<u8>(), BlsSignature::LEN).prop_map(|bytes| {
        let mut arr = [0u8; BlsSignature::LEN];
        arr.copy_from_slice(&bytes);
        BlsSignature::from_bytes(arr)
    })
}

pub fn checkpoint() -> impl Strategy<Value = Checkpoint> {
    (any::<u64>(), root()).prop_map(|(epoch, root)| Checkpoint { epoch, root })
}

pub fn deposit_message() -> impl Strategy<Value = DepositMessage> {
    (pubkey(), root(), any::<u64>()).prop_map(|(pubkey, withdrawal_credentials, amount)| {
        DepositMessage {
            pubkey,
            withdrawal_credentials,
            amount,
        }
    })
}

pub fn attestation_data() -> impl Strategy<Value = AttestationData> {
    (any::<u64>(), any::<u64>(), root(), checkpoint(), checkpoint()).prop_map(
        |(slot, index, beacon_block_root, source, target)| AttestationData {
            slot,
            index,
            beacon_block_root,
            source,
            target,
        },
    )
}

/// Attestations with up to `max_bits` aggregation bits.
pub fn attestation(max_bits: usize) -> impl Strategy<Value = Attestation> {
    let max_bits = max_bits.min(MAX_VALIDATORS_PER_COMMITTEE);
    (
        prop::collection::vec(any::<bool>(), 0..=max_bits),
        attestation_data(),
        signature(),
    )
        .prop_filter_map("bitlist within capacity", |(bits, data, signature)| {
            let aggregation_bits = BitList::from_bits(Bits::from_bools(&bits)).ok()?;
            Some(Attestation {
                aggregation_bits,
                data,
                signature,
            })
        })
}

pub fn indexed_attestation(max_indices: usize) -> impl Strategy<Value = IndexedAttestation> {
    let max_indices = max_indices.min(MAX_VALIDATORS_PER_COMMITTEE);
    (
        prop::collection::vec(any::<u64>(), 0..=max_indices),
        attestation_data(),
        signature(),
    )
        .prop_filter_map("indices within capacity", |(indices, data, signature)| {
            Some(IndexedAttestation {
                attesting_indices: List::new(indices).ok()?,
                data,
                signature,
            })
        })
}

pub fn signed_beacon_block_header() -> impl Strategy<Value = SignedBeaconBlockHeader> {
    (any::<u64>(), any::<u64>(), root(), root(), root(), signature()).prop_map(
        |(slot, proposer_index, parent_root, state_root, body_root, signature)| {
            SignedBeaconBlockHeader {
                message: BeaconBlockHeader {
                    slot,
                    proposer_index,
                    parent_root,
                    state_root,
                    body_root,
                },
                signature,
            }
        },
    )
}

pub fn signed_voluntary_exit() -> impl Strategy<Value = SignedVoluntaryExit> {
    (any::<u64>(), any::<u64>(), signature()).prop_map(|(epoch, validator_index, signature)| {
        SignedVoluntaryExit {
            message: VoluntaryExit {
                epoch,
                validator_index,
            },
            signature,
        }
    })
}

pub fn sync_aggregate() -> impl Strategy<Value = SyncAggregate> {
    (
        prop::collection::vec(any::<bool>(), beacon_ssz_core::preset::SYNC_COMMITTEE_SIZE),
        signature(),
    )
        .prop_filter_map("bitvector of committee size", |(bits, signature)| {
            Some(SyncAggregate {
                sync_committee_bits: BitVector::from_bits(Bits::from_bools(&bits)).ok()?,
                sync_committee_signature: signature,
            })
        })
}
