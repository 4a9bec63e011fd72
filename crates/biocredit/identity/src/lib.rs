//! BioCredit Identity - registration of biometric-proxy identities
//!
//! The registrar keeps the set of tokens that have completed registration and
//! refuses to admit any token twice. Token derivation is delegated to a
//! [`UniquenessOracle`] so a real proof system can replace the hash check
//! without touching the registrar.

#![deny(unsafe_code)]

pub mod oracle;

use std::collections::HashSet;
use std::sync::Arc;

use biocredit_types::IdentityToken;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use oracle::{DigestAlgorithm, HashOracle, ParseDigestError, UniquenessOracle};

/// Registrar configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrarConfig {
    #[serde(default)]
    pub digest: DigestAlgorithm,
}

/// Set of registered identities plus the oracle that derives them.
///
/// The registrar performs no locking; callers that share it across threads
/// must guard it together with whatever state is created alongside each
/// identity.
pub struct IdentityRegistrar {
    oracle: Arc<dyn UniquenessOracle>,
    registered: HashSet<IdentityToken>,
}

impl IdentityRegistrar {
    pub fn new(oracle: Arc<dyn UniquenessOracle>) -> Self {
        Self {
            oracle,
            registered: HashSet::new(),
        }
    }

    /// Registrar backed by a [`HashOracle`] with the configured digest.
    pub fn from_config(config: &RegistrarConfig) -> Self {
        Self::new(Arc::new(HashOracle::new(config.digest)))
    }

    pub fn scheme(&self) -> &'static str {
        self.oracle.scheme()
    }

    /// Token a sample maps to, registered or not. Empty samples never reach
    /// the oracle.
    pub fn derive(&self, sample: &[u8]) -> Result<IdentityToken, IdentityError> {
        if sample.is_empty() {
            return Err(IdentityError::EmptySample);
        }
        self.oracle.derive_token(sample)
    }

    /// Derive the token for a sample and confirm it is not yet registered.
    ///
    /// Does not mutate the registrar; follow with [`IdentityRegistrar::admit`].
    pub fn verify(&self, sample: &[u8]) -> Result<IdentityToken, IdentityError> {
        let token = self.derive(sample)?;
        if self.registered.contains(&token) {
            debug!(token = token.short(), "duplicate biometric proxy");
            return Err(IdentityError::Duplicate(token));
        }
        Ok(token)
    }

    /// Add a verified token to the registered set.
    pub fn admit(&mut self, token: IdentityToken) -> Result<(), IdentityError> {
        if self.registered.contains(&token) {
            return Err(IdentityError::Duplicate(token));
        }
        self.registered.insert(token);
        Ok(())
    }

    pub fn contains(&self, token: &IdentityToken) -> bool {
        self.registered.contains(token)
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &IdentityToken> {
        self.registered.iter()
    }
}

impl Default for IdentityRegistrar {
    fn default() -> Self {
        Self::from_config(&RegistrarConfig::default())
    }
}

/// Identity-related errors
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("duplicate identity: {0} is already registered")]
    Duplicate(IdentityToken),

    #[error("biometric sample is empty")]
    EmptySample,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_then_admit() {
        let mut registrar = IdentityRegistrar::default();
        let token = registrar.verify(b"A").unwrap();
        assert!(!registrar.contains(&token));

        registrar.admit(token.clone()).unwrap();
        assert!(registrar.contains(&token));
        assert_eq!(registrar.len(), 1);
    }

    #[test]
    fn second_registration_of_same_sample_is_duplicate() {
        let mut registrar = IdentityRegistrar::default();
        let token = registrar.verify(b"A").unwrap();
        registrar.admit(token.clone()).unwrap();

        match registrar.verify(b"A") {
            Err(IdentityError::Duplicate(dup)) => assert_eq!(dup, token),
            other => panic!("expected duplicate, got {:?}", other),
        }
        assert!(matches!(
            registrar.admit(token),
            Err(IdentityError::Duplicate(_))
        ));
        assert_eq!(registrar.len(), 1);
    }

    #[test]
    fn verify_does_not_mutate() {
        let registrar = IdentityRegistrar::default();
        registrar.verify(b"A").unwrap();
        registrar.verify(b"A").unwrap();
        assert!(registrar.is_empty());
    }

    #[test]
    fn config_selects_digest() {
        let registrar = IdentityRegistrar::from_config(&RegistrarConfig {
            digest: DigestAlgorithm::Blake3,
        });
        assert_eq!(registrar.scheme(), "blake3");
        assert_eq!(IdentityRegistrar::default().scheme(), "sha256");
    }

    #[test]
    fn custom_oracle_is_pluggable() {
        struct Echo;
        impl UniquenessOracle for Echo {
            fn scheme(&self) -> &'static str {
                "echo"
            }
            fn derive_token(&self, sample: &[u8]) -> Result<IdentityToken, IdentityError> {
                Ok(IdentityToken::new(String::from_utf8_lossy(sample)))
            }
        }

        let mut registrar = IdentityRegistrar::new(Arc::new(Echo));
        let token = registrar.verify(b"alice").unwrap();
        assert_eq!(token.as_str(), "alice");
        registrar.admit(token).unwrap();
        assert_eq!(registrar.tokens().count(), 1);
    }

    #[test]
    fn empty_sample_rejected_for_every_oracle() {
        struct Counter;
        impl UniquenessOracle for Counter {
            fn scheme(&self) -> &'static str {
                "counter"
            }
            fn derive_token(&self, sample: &[u8]) -> Result<IdentityToken, IdentityError> {
                Ok(IdentityToken::new(format!("t{}", sample.len())))
            }
        }

        let custom = IdentityRegistrar::new(Arc::new(Counter));
        assert!(matches!(custom.verify(b""), Err(IdentityError::EmptySample)));
        assert!(matches!(custom.derive(b""), Err(IdentityError::EmptySample)));

        let hashed = IdentityRegistrar::default();
        assert!(matches!(hashed.verify(b""), Err(IdentityError::EmptySample)));
    }
}
