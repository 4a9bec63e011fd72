//! BioCredit Types - shared vocabulary for the time-credit ledger
//!
//! Balances are measured in BioSeconds: one second of entitlement. Participants
//! are referenced only by their [`IdentityToken`], a one-way digest of the
//! biometric proxy they registered with.

#![deny(unsafe_code)]

pub mod policy;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use policy::{
    Policy, DECREE, DEFAULT_TRANSFER_NOTE, INITIAL_GRANT_SECONDS, INITIAL_GRANT_YEARS,
    SECONDS_PER_YEAR, SOVEREIGNTY, TRANSACTION_FEE,
};

/// Opaque participant handle derived from a biometric proxy.
///
/// Construction is unchecked: callers may hold tokens that were never
/// registered, and the ledger reports those as unknown identities.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityToken(pub String);

impl IdentityToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 characters, for log lines and tables.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(12)
            .map(|(idx, _)| idx)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl std::fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for IdentityToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A quantity of time credit, in whole seconds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BioSeconds(u64);

impl BioSeconds {
    pub const ZERO: BioSeconds = BioSeconds(0);

    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: BioSeconds) -> Option<BioSeconds> {
        self.0.checked_add(rhs.0).map(BioSeconds)
    }

    pub fn checked_sub(self, rhs: BioSeconds) -> Option<BioSeconds> {
        self.0.checked_sub(rhs.0).map(BioSeconds)
    }

    /// Balance expressed in BioCredits (mean Julian years).
    pub fn as_credits(self) -> f64 {
        self.0 as f64 / SECONDS_PER_YEAR as f64
    }

    /// Seconds with thousands separators, e.g. `3,155,760,000`.
    pub fn grouped(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

impl std::fmt::Display for BioSeconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl From<u64> for BioSeconds {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::iter::Sum for BioSeconds {
    fn sum<I: Iterator<Item = BioSeconds>>(iter: I) -> Self {
        BioSeconds(iter.map(|s| s.0).sum())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A settled transfer. The note is descriptive only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub receipt_id: ReceiptId,
    pub sender: IdentityToken,
    pub receiver: IdentityToken,
    pub amount: BioSeconds,
    pub note: String,
    pub fee: BioSeconds,
    pub settled_at: DateTime<Utc>,
}

impl TransferReceipt {
    pub fn involves(&self, token: &IdentityToken) -> bool {
        &self.sender == token || &self.receiver == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_inserts_separators() {
        assert_eq!(BioSeconds::new(0).grouped(), "0");
        assert_eq!(BioSeconds::new(900).grouped(), "900");
        assert_eq!(BioSeconds::new(1_000).grouped(), "1,000");
        assert_eq!(BioSeconds::new(3_155_760_000).grouped(), "3,155,760,000");
    }

    #[test]
    fn credits_are_years() {
        assert_eq!(INITIAL_GRANT_SECONDS.as_credits(), 100.0);
        assert_eq!(BioSeconds::new(SECONDS_PER_YEAR / 2).as_credits(), 0.5);
    }

    #[test]
    fn checked_arithmetic_refuses_underflow() {
        assert_eq!(BioSeconds::new(5).checked_sub(BioSeconds::new(6)), None);
        assert_eq!(BioSeconds::new(u64::MAX).checked_add(BioSeconds::new(1)), None);
        assert_eq!(
            BioSeconds::new(5).checked_sub(BioSeconds::new(5)),
            Some(BioSeconds::ZERO)
        );
    }

    #[test]
    fn short_token_is_prefix() {
        let token = IdentityToken::new("0123456789abcdef");
        assert_eq!(token.short(), "0123456789ab");
        assert_eq!(IdentityToken::new("ghost").short(), "ghost");
    }

    #[test]
    fn tokens_serialize_as_plain_strings() {
        let token = IdentityToken::new("abc");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc\"");
        assert_eq!(serde_json::to_string(&BioSeconds::new(7)).unwrap(), "7");
    }

    #[test]
    fn receipt_involvement() {
        let receipt = TransferReceipt {
            receipt_id: ReceiptId::generate(),
            sender: IdentityToken::new("a"),
            receiver: IdentityToken::new("b"),
            amount: BioSeconds::new(1),
            note: DEFAULT_TRANSFER_NOTE.to_string(),
            fee: TRANSACTION_FEE,
            settled_at: Utc::now(),
        };
        assert!(receipt.involves(&IdentityToken::new("a")));
        assert!(receipt.involves(&IdentityToken::new("b")));
        assert!(!receipt.involves(&IdentityToken::new("c")));
    }
}
