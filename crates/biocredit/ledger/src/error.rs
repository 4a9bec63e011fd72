use biocredit_identity::IdentityError;
use biocredit_types::{BioSeconds, IdentityToken};
use thiserror::Error;

/// Ledger-related errors.
///
/// Every variant is a reported outcome; none leaves the ledger half-mutated.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("duplicate identity: {0} is already registered")]
    DuplicateIdentity(IdentityToken),

    #[error("unknown identity: {0}")]
    UnknownIdentity(IdentityToken),

    #[error("insufficient balance: {token} holds {available}, transfer requires {requested}")]
    InsufficientBalance {
        token: IdentityToken,
        available: BioSeconds,
        requested: BioSeconds,
    },

    #[error("invalid amount: {0} (transfers must move a positive number of seconds)")]
    InvalidAmount(u64),

    #[error("self-transfer rejected for {0}")]
    SelfTransfer(IdentityToken),

    #[error("biometric sample is empty")]
    EmptySample,

    #[error("balance overflow crediting {0}")]
    BalanceOverflow(IdentityToken),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    /// Stable snake_case name of the variant, for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::DuplicateIdentity(_) => "duplicate_identity",
            LedgerError::UnknownIdentity(_) => "unknown_identity",
            LedgerError::InsufficientBalance { .. } => "insufficient_balance",
            LedgerError::InvalidAmount(_) => "invalid_amount",
            LedgerError::SelfTransfer(_) => "self_transfer",
            LedgerError::EmptySample => "empty_sample",
            LedgerError::BalanceOverflow(_) => "balance_overflow",
            LedgerError::LockPoisoned => "lock_poisoned",
        }
    }
}

impl From<IdentityError> for LedgerError {
    fn from(value: IdentityError) -> Self {
        match value {
            IdentityError::Duplicate(token) => Self::DuplicateIdentity(token),
            IdentityError::EmptySample => Self::EmptySample,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_errors_map_onto_ledger_taxonomy() {
        let token = IdentityToken::new("abc");
        let err: LedgerError = IdentityError::Duplicate(token.clone()).into();
        assert!(matches!(err, LedgerError::DuplicateIdentity(t) if t == token));

        let err: LedgerError = IdentityError::EmptySample.into();
        assert_eq!(err.kind(), "empty_sample");
    }

    #[test]
    fn insufficient_balance_display() {
        let err = LedgerError::InsufficientBalance {
            token: IdentityToken::new("a"),
            available: BioSeconds::new(10),
            requested: BioSeconds::new(11),
        };
        let s = err.to_string();
        assert!(s.contains("10s"));
        assert!(s.contains("11s"));
        assert_eq!(err.kind(), "insufficient_balance");
    }
}
