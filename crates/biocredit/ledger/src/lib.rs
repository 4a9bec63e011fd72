//! BioCredit Ledger - universal basic-time accounting
//!
//! Humans register once with a biometric proxy and receive the initial grant
//! of 100 years expressed in seconds. Registered identities can then move
//! seconds to one another with no fee.
//!
//! All state lives in a [`BioCreditSystem`] held in process memory. Nothing is
//! persisted; dropping the system discards every registration and balance.
//!
//! ## Invariants
//!
//! - Every balance belongs to a registered identity and every registered
//!   identity has a balance.
//! - Balances never go negative.
//! - Transfers conserve the total supply.

#![deny(unsafe_code)]

pub mod balances;
pub mod error;
pub mod journal;
pub mod system;

use biocredit_identity::RegistrarConfig;
use serde::{Deserialize, Serialize};

pub use balances::BalanceSheet;
pub use error::{LedgerError, LedgerResult};
pub use journal::{JournalConfig, TransferJournal};
pub use system::{BioCreditSystem, SystemStatus, TransferRequest};

/// Complete ledger configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioCreditConfig {
    #[serde(default)]
    pub registrar: RegistrarConfig,
    #[serde(default)]
    pub journal: JournalConfig,
}
