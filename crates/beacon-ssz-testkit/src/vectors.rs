//! Golden test vectors for deterministic verification.
//!
//! Each vector fixes a value's JSON form, its canonical encoding and its
//! hash tree root. They are checked through the dynamic engine so that any
//! drift in the binary codec, the merkleizer or the textual codec shows up.

use beacon_ssz_core::altair::SyncAggregate;
use beacon_ssz_core::phase0::{Checkpoint, DepositMessage, Eth1Data, VoluntaryExit};
use beacon_ssz_core::{canonical, merkle, text, Shape, SszType};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Shape of the value.
    pub shape: fn() -> Shape,
    /// Canonical compact JSON.
    pub json: &'static str,
    /// Canonical encoding (hex).
    pub ssz: &'static str,
    /// Expected hash tree root (hex).
    pub root: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "DepositMessage with sequential keys",
            shape: DepositMessage::shape,
            json: r#"{"pubkey":"0x000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f","withdrawal_credentials":"0x202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f","amount":"32000000000"}"#,
            ssz: "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f0040597307000000",
            root: "010aa56097fc6a6a16b8f3dfeec37f6b4116423531b355c3f69b8ad1cbe294bd",
        },
        GoldenVector {
            name: "SyncAggregate with partial participation",
            shape: SyncAggregate::shape,
            json: r#"{"sync_committee_bits":"0xe7fcbc21f184b9b89bfc57cc07232a4fce8e12efee3a8c4967932491267a215cd0aff3e79f19645d6f832592f93d91271071a4e911d3f64447e1f6f68247fdec","sync_committee_signature":"0xe63b8ab602266593dbfe7f714891c5fed225e09c214bda8281c86ceddb6ee10727a854f213d33be1f032399e0044db6fa30368b6dc857fa8f12f61fc3bf4113a6e9cefeb11758fb01a9939950e127d71dc9c54a26aec63ef024b6620e6d32e44"}"#,
            ssz: "e7fcbc21f184b9b89bfc57cc07232a4fce8e12efee3a8c4967932491267a215cd0aff3e79f19645d6f832592f93d91271071a4e911d3f64447e1f6f68247fdece63b8ab602266593dbfe7f714891c5fed225e09c214bda8281c86ceddb6ee10727a854f213d33be1f032399e0044db6fa30368b6dc857fa8f12f61fc3bf4113a6e9cefeb11758fb01a9939950e127d71dc9c54a26aec63ef024b6620e6d32e44",
            root: "cbbe7125cc8f67f40d66b5c10420ebc93757f8b7883b7b8f436c4ac7f1901b2c",
        },
        GoldenVector {
            name: "Checkpoint",
            shape: Checkpoint::shape,
            json: r#"{"epoch":"3","root":"0xcccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccc"}"#,
            ssz: "0300000000000000cccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccc",
            root: "e4452df6c55c689ae037b0a24544c6ceafd866a63f5ba03d8fc20de28330a686",
        },
        GoldenVector {
            name: "VoluntaryExit",
            shape: VoluntaryExit::shape,
            json: r#"{"epoch":"4","validator_index":"99"}"#,
            ssz: "04000000000000006300000000000000",
            root: "44fc09b5cadf397e514be1e2a3cb8b7a8cabad8b5cacd73324d74f71d63c8aef",
        },
        GoldenVector {
            name: "Eth1Data",
            shape: Eth1Data::shape,
            json: r#"{"deposit_root":"0x0101010101010101010101010101010101010101010101010101010101010101","deposit_count":"42","block_hash":"0x0202020202020202020202020202020202020202020202020202020202020202"}"#,
            ssz: "01010101010101010101010101010101010101010101010101010101010101012a000000000000000202020202020202020202020202020202020202020202020202020202020202",
            root: "2e91c08bbdc38040de821117df81f55101b041092aacc7857a2cee2d34e7b634",
        },
    ]
}

/// Check one vector end to end, returning the computed root (hex) or a
/// description of the first mismatch.
pub fn check_vector(vector: &GoldenVector) -> Result<String, String> {
    let shape = (vector.shape)();
    let value = text::from_json(vector.json, &shape).map_err(|e| format!("from_json: {e}"))?;

    let json = text::to_json(&value, &shape).map_err(|e| format!("to_json: {e}"))?;
    if json != vector.json {
        return Err(format!("JSON drift: {json}"));
    }

    let ssz = canonical::encode(&value, &shape).map_err(|e| format!("encode: {e}"))?;
    if hex::encode(&ssz) != vector.ssz {
        return Err(format!("encoding drift: {}", hex::encode(&ssz)));
    }
    let decoded = canonical::decode(&ssz, &shape).map_err(|e| format!("decode: {e}"))?;
    if decoded != value {
        return Err("decoded value differs".into());
    }

    let root = merkle::hash_tree_root(&value, &shape).map_err(|e| format!("digest: {e}"))?;
    Ok(root.to_hex())
}

/// Verify all golden vectors.
///
/// Returns `(name, matches, computed root or error)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match check_vector(v) {
            Ok(root) => (v.name.to_string(), root == v.root, root),
            Err(err) => (v.name.to_string(), false, err),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, detail) in verify_all_vectors() {
            assert!(matches, "vector '{name}' failed: {detail}");
        }
    }

    #[test]
    fn test_vectors_are_deterministic() {
        for vector in all_vectors() {
            assert_eq!(check_vector(&vector), check_vector(&vector), "{}", vector.name);
        }
    }

    #[test]
    fn test_tampered_vector_is_detected() {
        let mut vector = all_vectors().remove(0);
        vector.ssz = "00";
        assert!(check_vector(&vector).unwrap_err().starts_with("encoding drift"));

        vector.json = r#"{"pubkey":"0x00"}"#;
        assert!(check_vector(&vector).is_err());
    }
}
