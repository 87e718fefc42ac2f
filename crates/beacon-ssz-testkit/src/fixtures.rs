//! Conformance harness for `consensus-spec-tests` `ssz_static` fixtures.
//!
//! A fixture case is a directory holding:
//!
//! - `value.yaml` - the value in YAML form
//! - `serialized.ssz_snappy` - its canonical encoding, snappy block-compressed
//! - `roots.yaml` - `{root: '0x<hex>'}` and a newline
//!
//! Cases live under
//! `<root>/tests/<preset>/<fork>/<handler>/<Type>/<suite>/<case>/`.

use std::fs;
use std::path::{Path, PathBuf};

use beacon_ssz_core::{DecodeError, EncodeError, SszType, TextError};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const VALUE_FILE: &str = "value.yaml";
pub const SERIALIZED_FILE: &str = "serialized.ssz_snappy";
pub const ROOTS_FILE: &str = "roots.yaml";

/// Where to find the `consensus-spec-tests` fixtures and which of them to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformanceConfig {
    /// Checkout of `consensus-spec-tests`.
    pub root: PathBuf,
    pub preset: String,
    pub forks: Vec<String>,
    pub handler: String,
    pub suite: String,
}

impl ConformanceConfig {
    /// Environment variable naming the fixture checkout.
    pub const ENV_VAR: &'static str = "ETH2_SPEC_TESTS_DIR";

    /// Configuration rooted at `$ETH2_SPEC_TESTS_DIR`, or `None` when the
    /// variable is unset or empty and the suite should be skipped.
    pub fn from_env() -> Option<Self> {
        let root = std::env::var_os(Self::ENV_VAR).filter(|v| !v.is_empty())?;
        Some(Self {
            root: PathBuf::from(root),
            ..Self::default()
        })
    }

    /// Directory holding every case of one type.
    pub fn type_dir(&self, fork: &str, type_name: &str) -> PathBuf {
        self.root
            .join("tests")
            .join(&self.preset)
            .join(fork)
            .join(&self.handler)
            .join(type_name)
            .join(&self.suite)
    }
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("consensus-spec-tests"),
            preset: "mainnet".into(),
            forks: vec!["phase0".into(), "altair".into()],
            handler: "ssz_static".into(),
            suite: "ssz_random".into(),
        }
    }
}

/// A fixture case could not be read or did not conform.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snappy: {0}")]
    Snappy(#[from] snap::Error),

    #[error("{file}: {source}")]
    Text {
        file: &'static str,
        #[source]
        source: TextError,
    },

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("{what} mismatch: expected {expected}, got {actual}")]
    Mismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },
}

/// Outcome of running a directory of cases.
#[derive(Debug, Default)]
pub struct FixtureReport {
    pub passed: Vec<String>,
    pub failed: Vec<(String, FixtureError)>,
}

impl FixtureReport {
    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

fn read(path: &Path) -> Result<Vec<u8>, FixtureError> {
    fs::read(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_string(path: &Path) -> Result<String, FixtureError> {
    fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &[u8]) -> Result<(), FixtureError> {
    fs::write(path, contents).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn mismatch(what: &'static str, expected: &[u8], actual: &[u8]) -> FixtureError {
    FixtureError::Mismatch {
        what,
        expected: hex::encode(expected),
        actual: hex::encode(actual),
    }
}

/// Render a root the way `roots.yaml` stores it.
pub fn roots_yaml<T: SszType>(value: &T) -> Result<String, FixtureError> {
    Ok(format!("{{root: '{}'}}\n", value.hash_tree_root()?))
}

/// Check one fixture case.
///
/// The binary form must survive decode and re-encode unchanged, the YAML
/// value must encode to the same bytes, and its root must match
/// `roots.yaml`.
pub fn run_fixture_case<T: SszType>(dir: &Path) -> Result<(), FixtureError> {
    let yaml = read_string(&dir.join(VALUE_FILE))?;
    let compressed = read(&dir.join(SERIALIZED_FILE))?;
    let ssz = snap::raw::Decoder::new().decompress_vec(&compressed)?;

    let decoded = T::from_ssz_bytes(&ssz)?;
    let reencoded = decoded.to_ssz_bytes()?;
    if reencoded != ssz {
        return Err(mismatch("re-encoded bytes", &ssz, &reencoded));
    }

    let value = T::from_yaml_str(&yaml).map_err(|source| FixtureError::Text {
        file: VALUE_FILE,
        source,
    })?;
    let encoded = value.to_ssz_bytes()?;
    if encoded != ssz {
        return Err(mismatch("YAML value encoding", &ssz, &encoded));
    }

    let expected = read_string(&dir.join(ROOTS_FILE))?;
    let actual = roots_yaml(&value)?;
    if actual != expected {
        return Err(FixtureError::Mismatch {
            what: "root",
            expected,
            actual,
        });
    }

    debug!(case = %dir.display(), bytes = ssz.len(), "fixture case passed");
    Ok(())
}

/// Run every case subdirectory of `dir`, in name order.
///
/// Only failure to list `dir` itself is an error; per-case failures are
/// collected in the report.
pub fn run_fixture_dir<T: SszType>(dir: &Path) -> Result<FixtureReport, FixtureError> {
    let entries = fs::read_dir(dir).map_err(|source| FixtureError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut cases = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect::<Vec<_>>();
    cases.sort();

    info!(dir = %dir.display(), cases = cases.len(), "running fixture directory");

    let mut report = FixtureReport::default();
    for case in cases {
        let name = case
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match run_fixture_case::<T>(&case) {
            Ok(()) => report.passed.push(name),
            Err(err) => {
                debug!(case = %name, error = %err, "fixture case failed");
                report.failed.push((name, err));
            }
        }
    }
    Ok(report)
}

/// Run the configured suite for one type and fork. A missing type
/// directory is skipped with a warning and yields an empty report.
pub fn run_conformance<T: SszType>(
    config: &ConformanceConfig,
    fork: &str,
    type_name: &str,
) -> Result<FixtureReport, FixtureError> {
    let dir = config.type_dir(fork, type_name);
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "fixture set not found, skipping");
        return Ok(FixtureReport::default());
    }
    run_fixture_dir::<T>(&dir)
}

/// Write a case directory for `value`, in the `consensus-spec-tests` layout.
pub fn write_fixture_case<T: SszType>(dir: &Path, value: &T) -> Result<(), FixtureError> {
    fs::create_dir_all(dir).map_err(|source| FixtureError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let ssz = value.to_ssz_bytes()?;
    let compressed = snap::raw::Encoder::new().compress_vec(&ssz)?;

    write(&dir.join(VALUE_FILE), value.to_yaml_string()?.as_bytes())?;
    write(&dir.join(SERIALIZED_FILE), &compressed)?;
    write(&dir.join(ROOTS_FILE), roots_yaml(value)?.as_bytes())?;
    Ok(())
}
