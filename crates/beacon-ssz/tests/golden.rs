//! End-to-end checks of the collaborator operations.
//!
//! Every conforming implementation must agree on:
//! - the canonical JSON and YAML text
//! - the canonical binary encoding
//! - the hash tree root
//! - which inputs are rejected, and why

use beacon_ssz::altair::SyncAggregate;
use beacon_ssz::phase0::{Attestation, AttesterSlashing, DepositMessage, IndexedAttestation};
use beacon_ssz::{
    decode, digest, encode, from_text, to_text, DecodeError, Error, MalformedEncoding, SszType,
    TextError, TextFormat,
};
use beacon_ssz_testkit::generators::{attestation, deposit_message, sync_aggregate};
use beacon_ssz_testkit::vectors::verify_all_vectors;
use proptest::prelude::*;

const PUBKEY: &str = "0x000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f";
const CREDENTIALS: &str = "0x202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f";
const DEPOSIT_ROOT: &str = "010aa56097fc6a6a16b8f3dfeec37f6b4116423531b355c3f69b8ad1cbe294bd";

const SYNC_BITS: &str = "0xe7fcbc21f184b9b89bfc57cc07232a4fce8e12efee3a8c4967932491267a215cd0aff3e79f19645d6f832592f93d91271071a4e911d3f64447e1f6f68247fdec";
const SYNC_SIGNATURE: &str = "0xe63b8ab602266593dbfe7f714891c5fed225e09c214bda8281c86ceddb6ee10727a854f213d33be1f032399e0044db6fa30368b6dc857fa8f12f61fc3bf4113a6e9cefeb11758fb01a9939950e127d71dc9c54a26aec63ef024b6620e6d32e44";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn deposit_json(pubkey: &str) -> String {
    format!(
        r#"{{"pubkey":"{pubkey}","withdrawal_credentials":"{CREDENTIALS}","amount":"32000000000"}}"#
    )
}

fn sync_json(bits: &str) -> String {
    format!(r#"{{"sync_committee_bits":"{bits}","sync_committee_signature":"{SYNC_SIGNATURE}"}}"#)
}

#[test]
fn test_golden_vectors() {
    for (name, matches, detail) in verify_all_vectors() {
        assert!(matches, "vector '{name}' failed: {detail}");
    }
}

#[test]
fn test_deposit_message_fixture_triple() {
    init_tracing();
    let json = deposit_json(PUBKEY);
    let msg: DepositMessage = from_text(&json, TextFormat::Json).unwrap();
    assert_eq!(to_text(&msg, TextFormat::Json).unwrap(), json);

    let bytes = encode(&msg).unwrap();
    assert_eq!(
        hex::encode(&bytes),
        format!(
            "{}{}0040597307000000",
            &PUBKEY[2..],
            &CREDENTIALS[2..]
        )
    );
    assert_eq!(digest(&msg).unwrap().to_hex(), DEPOSIT_ROOT);

    let yaml = to_text(&msg, TextFormat::Yaml).unwrap();
    assert_eq!(
        yaml,
        format!("{{pubkey: '{PUBKEY}', withdrawal_credentials: '{CREDENTIALS}', amount: 32000000000}}\n")
    );
    let reparsed: DepositMessage = from_text(&yaml, TextFormat::Yaml).unwrap();
    assert_eq!(encode(&reparsed).unwrap(), bytes);
}

#[test]
fn test_missing_amount() {
    init_tracing();
    let json = format!(r#"{{"pubkey":"{PUBKEY}","withdrawal_credentials":"{CREDENTIALS}"}}"#);
    let err = from_text::<DepositMessage>(&json, TextFormat::Json).unwrap_err();
    assert!(matches!(err, Error::Text(TextError::MissingField(_))));
    assert_eq!(err.to_string(), "amount missing");

    let yaml = format!("{{pubkey: '{PUBKEY}', withdrawal_credentials: '{CREDENTIALS}'}}\n");
    let err = from_text::<DepositMessage>(&yaml, TextFormat::Yaml).unwrap_err();
    assert_eq!(err.to_string(), "amount missing");
}

#[test]
fn test_sync_committee_bits_length() {
    let short = sync_json(&SYNC_BITS.replace("0xe7", "0x"));
    let err = from_text::<SyncAggregate>(&short, TextFormat::Json).unwrap_err();
    assert!(matches!(
        err,
        Error::Text(TextError::IncorrectLength {
            expected: 64,
            actual: 63,
            ..
        })
    ));
    assert!(err.to_string().contains("too short"), "{err}");

    let long = sync_json(&format!("{SYNC_BITS}ff"));
    let err = from_text::<SyncAggregate>(&long, TextFormat::Json).unwrap_err();
    assert!(matches!(
        err,
        Error::Text(TextError::IncorrectLength {
            expected: 64,
            actual: 65,
            ..
        })
    ));
    assert!(err.to_string().contains("too long"), "{err}");

    let aggregate: SyncAggregate = from_text(&sync_json(SYNC_BITS), TextFormat::Json).unwrap();
    assert_eq!(aggregate.sync_committee_bits.bits().len(), 512);
    assert_eq!(
        digest(&aggregate).unwrap().to_hex(),
        "cbbe7125cc8f67f40d66b5c10420ebc93757f8b7883b7b8f436c4ac7f1901b2c"
    );
}

#[test]
fn test_empty_input() {
    init_tracing();
    for format in [TextFormat::Json, TextFormat::Yaml] {
        let err = from_text::<DepositMessage>("", format).unwrap_err();
        assert!(matches!(err, Error::Text(TextError::UnexpectedEnd)), "{format}");
        assert_eq!(err.to_string(), "unexpected end of input");
    }
    let err = from_text::<DepositMessage>("   \n", TextFormat::Json).unwrap_err();
    assert!(matches!(err, Error::Text(TextError::UnexpectedEnd)));

    assert!(matches!(
        decode::<DepositMessage>(&[]),
        Err(Error::Decode(DecodeError::IncorrectLength {
            expected: 88,
            actual: 0,
            ..
        }))
    ));
    assert!(matches!(
        decode::<IndexedAttestation>(&[]),
        Err(Error::Decode(DecodeError::Malformed(MalformedEncoding::Truncated { .. })))
    ));
}

#[test]
fn test_pubkey_length_boundary() {
    let short = &PUBKEY[..PUBKEY.len() - 2];
    let long = format!("{PUBKEY}30");
    for (pubkey, actual) in [(short, 47), (long.as_str(), 49)] {
        let err = from_text::<DepositMessage>(&deposit_json(pubkey), TextFormat::Json).unwrap_err();
        match err {
            Error::Text(TextError::IncorrectLength {
                field,
                expected,
                actual: got,
            }) => {
                assert_eq!(field, "public key");
                assert_eq!(expected, 48);
                assert_eq!(got, actual);
            }
            other => panic!("expected IncorrectLength, got {other:?}"),
        }
    }

    let msg: DepositMessage = from_text(&deposit_json(PUBKEY), TextFormat::Json).unwrap();
    let bytes = encode(&msg).unwrap();

    let mut missing_byte = bytes.clone();
    missing_byte.remove(47);
    let mut extra_byte = bytes.clone();
    extra_byte.insert(48, 0x30);
    for input in [missing_byte, extra_byte] {
        assert!(matches!(
            decode::<DepositMessage>(&input),
            Err(Error::Decode(DecodeError::IncorrectLength { expected: 88, .. }))
        ));
    }
}

/// Two empty indexed attestations: offsets 8 and 236, 464 bytes.
fn slashing_bytes() -> Vec<u8> {
    let bytes = encode(&AttesterSlashing::default()).unwrap();
    assert_eq!(bytes.len(), 464);
    assert_eq!(&bytes[..8], &[8, 0, 0, 0, 236, 0, 0, 0]);
    bytes
}

#[test]
fn test_decreasing_offset() {
    init_tracing();
    let mut bytes = slashing_bytes();
    bytes[4..8].copy_from_slice(&7u32.to_le_bytes());
    assert!(matches!(
        decode::<AttesterSlashing>(&bytes),
        Err(Error::Decode(DecodeError::Malformed(
            MalformedEncoding::OffsetsOutOfOrder {
                previous: 8,
                offset: 7
            }
        )))
    ));
}

#[test]
fn test_offset_past_end() {
    let mut bytes = slashing_bytes();
    bytes[4..8].copy_from_slice(&465u32.to_le_bytes());
    assert!(matches!(
        decode::<AttesterSlashing>(&bytes),
        Err(Error::Decode(DecodeError::Malformed(
            MalformedEncoding::OffsetOutOfRange {
                offset: 465,
                len: 464
            }
        )))
    ));

    let mut bytes = slashing_bytes();
    bytes[0..4].copy_from_slice(&u32::MAX.to_le_bytes());
    assert!(matches!(
        decode::<AttesterSlashing>(&bytes),
        Err(Error::Decode(DecodeError::Malformed(
            MalformedEncoding::FirstOffsetMismatch { .. }
        )))
    ));

    assert_eq!(
        decode::<AttesterSlashing>(&slashing_bytes()).unwrap(),
        AttesterSlashing::default()
    );
}

#[test]
fn test_yaml_round_trips() {
    let msg: DepositMessage = from_text(&deposit_json(PUBKEY), TextFormat::Json).unwrap();
    let yaml = to_text(&msg, TextFormat::Yaml).unwrap();
    assert_eq!(from_text::<DepositMessage>(&yaml, TextFormat::Yaml).unwrap(), msg);
    assert_eq!(msg.to_string(), yaml.trim_end());

    let aggregate: SyncAggregate = from_text(&sync_json(SYNC_BITS), TextFormat::Json).unwrap();
    let yaml = to_text(&aggregate, TextFormat::Yaml).unwrap();
    assert_eq!(
        yaml,
        format!("{{sync_committee_bits: '{SYNC_BITS}', sync_committee_signature: '{SYNC_SIGNATURE}'}}\n")
    );
    assert_eq!(from_text::<SyncAggregate>(&yaml, TextFormat::Yaml).unwrap(), aggregate);

    let block_style = format!(
        "sync_committee_bits: '{SYNC_BITS}'\nsync_committee_signature: \"{SYNC_SIGNATURE}\"\n"
    );
    assert_eq!(
        from_text::<SyncAggregate>(&block_style, TextFormat::Yaml).unwrap(),
        aggregate
    );
}

#[test]
fn test_serde_uses_text_form() {
    let msg: DepositMessage = from_text(&deposit_json(PUBKEY), TextFormat::Json).unwrap();
    assert_eq!(serde_json::to_string(&msg).unwrap(), deposit_json(PUBKEY));
    let parsed: DepositMessage = serde_json::from_str(&deposit_json(PUBKEY)).unwrap();
    assert_eq!(parsed, msg);
    assert!(serde_json::from_str::<DepositMessage>("{}").is_err());
}

proptest! {
    #[test]
    fn prop_deposit_message_operations(msg in deposit_message()) {
        let bytes = encode(&msg).unwrap();
        prop_assert_eq!(decode::<DepositMessage>(&bytes).unwrap(), msg.clone());
        prop_assert_eq!(digest(&msg).unwrap(), digest(&msg).unwrap());
        for format in [TextFormat::Json, TextFormat::Yaml] {
            let text = to_text(&msg, format).unwrap();
            prop_assert_eq!(from_text::<DepositMessage>(&text, format).unwrap(), msg.clone());
        }
    }

    #[test]
    fn prop_attestation_operations(att in attestation(128)) {
        let bytes = encode(&att).unwrap();
        let decoded: Attestation = decode(&bytes).unwrap();
        prop_assert_eq!(&decoded, &att);
        prop_assert_eq!(digest(&decoded).unwrap(), att.hash_tree_root().unwrap());
    }

    #[test]
    fn prop_sync_aggregate_text_is_stable(aggregate in sync_aggregate()) {
        let json = to_text(&aggregate, TextFormat::Json).unwrap();
        let reparsed: SyncAggregate = from_text(&json, TextFormat::Json).unwrap();
        prop_assert_eq!(to_text(&reparsed, TextFormat::Json).unwrap(), json);
    }
}
