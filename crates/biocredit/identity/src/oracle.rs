//! Uniqueness oracles.
//!
//! An oracle turns a biometric proxy into the token that represents its owner.
//! The only implementation today is a plain one-way digest: two registrations
//! are "the same human" exactly when their inputs hash to the same token. It
//! proves nothing about liveness or personhood and hides nothing beyond what
//! preimage resistance gives.

use std::fmt;
use std::str::FromStr;

use biocredit_types::IdentityToken;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::IdentityError;

/// Derives a deterministic identity token from a raw biometric proxy.
///
/// Implementations must be pure: the same sample always yields the same
/// token, and distinct samples yield distinct tokens with overwhelming
/// probability.
pub trait UniquenessOracle: Send + Sync {
    /// Short scheme name reported in status output.
    fn scheme(&self) -> &'static str;

    /// Derive the token for a sample. The registrar rejects empty samples
    /// before they reach the oracle.
    fn derive_token(&self, sample: &[u8]) -> Result<IdentityToken, IdentityError>;
}

/// Digest used by [`HashOracle`]. Both render 32 bytes as 64 hex chars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    #[serde(alias = "sha-256")]
    Sha256,
    Blake3,
}

impl DigestAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    fn digest_hex(&self, sample: &[u8]) -> String {
        match self {
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(sample)),
            DigestAlgorithm::Blake3 => blake3::hash(sample).to_hex().to_string(),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a digest name is neither `sha256` nor `blake3`.
#[derive(Debug, Error)]
#[error("unsupported digest algorithm: {0} (use sha256 or blake3)")]
pub struct ParseDigestError(pub String);

impl FromStr for DigestAlgorithm {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "blake3" => Ok(DigestAlgorithm::Blake3),
            other => Err(ParseDigestError(other.to_string())),
        }
    }
}

/// Hash-comparison oracle.
#[derive(Clone, Debug, Default)]
pub struct HashOracle {
    algorithm: DigestAlgorithm,
}

impl HashOracle {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }
}

impl UniquenessOracle for HashOracle {
    fn scheme(&self) -> &'static str {
        self.algorithm.as_str()
    }

    fn derive_token(&self, sample: &[u8]) -> Result<IdentityToken, IdentityError> {
        Ok(IdentityToken::new(self.algorithm.digest_hex(sample)))
    }
}
