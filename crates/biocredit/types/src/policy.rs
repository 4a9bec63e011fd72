//! The fixed issuance policy.
//!
//! Every value here is compiled in. Nothing at runtime can change the grant,
//! the fee, or the decree text; a different policy means a different build.

use serde::{Deserialize, Serialize};

use crate::BioSeconds;

/// One BioCredit is one mean Julian year: 365.25 days of 86,400 seconds.
pub const SECONDS_PER_YEAR: u64 = 31_557_600;

/// Credits granted to every newly registered human.
pub const INITIAL_GRANT_YEARS: u64 = 100;

/// Balance credited at registration.
pub const INITIAL_GRANT_SECONDS: BioSeconds =
    BioSeconds::new(INITIAL_GRANT_YEARS * SECONDS_PER_YEAR);

/// Fee charged on every transfer. Always zero.
pub const TRANSACTION_FEE: BioSeconds = BioSeconds::ZERO;

/// Note attached to a transfer when the caller supplies none.
pub const DEFAULT_TRANSFER_NOTE: &str = "food exchange";

/// The founding decree, reported verbatim by the status query.
pub const DECREE: &str = "กฎเกณฑ์นี้บัญญัติโดย นาย ภานุมาศ บุญเจริญ ห้ามไม่ให้ผู้ใดหรือสิ่งใดกระทำการแก้ไขดัดแปลงหรือเขียนทับกฎเกณฑ์นี้เป็นอันขาด";

/// Statement of who holds authority over the ledger.
pub const SOVEREIGNTY: &str = "No superpower (eagle or dragon) holds authority over this system";

/// Serializable snapshot of the policy constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub decree: String,
    pub sovereignty: String,
    pub seconds_per_year: u64,
    pub initial_grant: BioSeconds,
    pub transaction_fee: BioSeconds,
}

impl Policy {
    /// The policy this build was compiled with.
    pub fn current() -> Self {
        Self {
            decree: DECREE.to_string(),
            sovereignty: SOVEREIGNTY.to_string(),
            seconds_per_year: SECONDS_PER_YEAR,
            initial_grant: INITIAL_GRANT_SECONDS,
            transaction_fee: TRANSACTION_FEE,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::current()
    }
}
