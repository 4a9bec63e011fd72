use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use biocredit_identity::{IdentityRegistrar, UniquenessOracle};
use biocredit_types::{
    BioSeconds, IdentityToken, Policy, ReceiptId, TransferReceipt, DEFAULT_TRANSFER_NOTE,
    INITIAL_GRANT_SECONDS, TRANSACTION_FEE,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::balances::BalanceSheet;
use crate::error::{LedgerError, LedgerResult};
use crate::journal::{JournalConfig, TransferJournal};
use crate::BioCreditConfig;

/// The BioCredit state container.
///
/// Holds the registered identity set, the balance sheet and the transfer
/// journal behind a single lock, so registration and transfer are each one
/// serializable transaction. Construct it once and pass it to whatever drives
/// the ledger.
pub struct BioCreditSystem {
    state: RwLock<LedgerState>,
}

struct LedgerState {
    registrar: IdentityRegistrar,
    balances: BalanceSheet,
    journal: TransferJournal,
    transfers_settled: u64,
}

impl BioCreditSystem {
    /// Create a system with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&BioCreditConfig::default())
    }

    pub fn with_config(config: &BioCreditConfig) -> Self {
        Self::from_parts(
            IdentityRegistrar::from_config(&config.registrar),
            config.journal.clone(),
        )
    }

    /// Create a system that derives identities with a custom oracle.
    pub fn with_oracle(oracle: Arc<dyn UniquenessOracle>, journal: JournalConfig) -> Self {
        Self::from_parts(IdentityRegistrar::new(oracle), journal)
    }

    fn from_parts(registrar: IdentityRegistrar, journal: JournalConfig) -> Self {
        Self {
            state: RwLock::new(LedgerState {
                registrar,
                balances: BalanceSheet::new(),
                journal: TransferJournal::new(journal),
                transfers_settled: 0,
            }),
        }
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, LedgerState>> {
        self.state.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state.write().map_err(|_| LedgerError::LockPoisoned)
    }

    /// Register a human from a biometric proxy and credit the initial grant.
    pub fn register(&self, sample: impl AsRef<[u8]>) -> LedgerResult<IdentityToken> {
        let mut state = self.write()?;

        let token = match state.registrar.verify(sample.as_ref()) {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "registration rejected");
                return Err(err.into());
            }
        };

        // Open the balance first: it is the only step that can still fail.
        state.balances.open(&token, INITIAL_GRANT_SECONDS)?;
        state.registrar.admit(token.clone())?;

        info!(
            token = token.short(),
            grant = %INITIAL_GRANT_SECONDS.grouped(),
            population = state.registrar.len(),
            "identity registered"
        );
        Ok(token)
    }

    /// Move `amount` from sender to receiver. No fee is charged.
    pub fn transfer(&self, request: TransferRequest) -> LedgerResult<TransferReceipt> {
        let mut state = self.write()?;
        let result = state.settle(&request);
        match &result {
            Ok(receipt) => info!(
                sender = receipt.sender.short(),
                receiver = receipt.receiver.short(),
                amount = receipt.amount.as_u64(),
                fee = receipt.fee.as_u64(),
                note = %receipt.note,
                "transfer settled"
            ),
            Err(err) => warn!(
                sender = request.sender.short(),
                receiver = request.receiver.short(),
                amount = request.amount,
                error = %err,
                "transfer rejected"
            ),
        }
        result
    }

    /// Current balance of a registered identity.
    pub fn balance(&self, token: &IdentityToken) -> LedgerResult<BioSeconds> {
        self.read()?
            .balances
            .balance(token)
            .ok_or_else(|| LedgerError::UnknownIdentity(token.clone()))
    }

    /// Token a biometric proxy maps to, without registering it.
    pub fn token_for(&self, sample: impl AsRef<[u8]>) -> LedgerResult<IdentityToken> {
        Ok(self.read()?.registrar.derive(sample.as_ref())?)
    }

    pub fn is_registered(&self, token: &IdentityToken) -> LedgerResult<bool> {
        Ok(self.read()?.registrar.contains(token))
    }

    /// Population size and the fixed policy. Read-only.
    pub fn status(&self) -> LedgerResult<SystemStatus> {
        let state = self.read()?;
        let policy = Policy::current();
        Ok(SystemStatus {
            registered_count: state.registrar.len(),
            policy_text: policy.decree,
            sovereignty: policy.sovereignty,
            identity_scheme: state.registrar.scheme().to_string(),
            initial_grant: policy.initial_grant,
            transaction_fee: policy.transaction_fee,
            total_supply: state.balances.total(),
            transfers_settled: state.transfers_settled,
        })
    }

    /// Journaled transfers involving `token`, newest first.
    pub fn history(
        &self,
        token: &IdentityToken,
        limit: Option<usize>,
    ) -> LedgerResult<Vec<TransferReceipt>> {
        let state = self.read()?;
        if !state.registrar.contains(token) {
            return Err(LedgerError::UnknownIdentity(token.clone()));
        }
        Ok(state.journal.involving(token, limit))
    }

    /// Every balance, sorted by token.
    pub fn balances(&self) -> LedgerResult<Vec<(IdentityToken, BioSeconds)>> {
        let state = self.read()?;
        let mut entries: Vec<_> = state
            .balances
            .iter()
            .map(|(token, balance)| (token.clone(), *balance))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }
}

impl Default for BioCreditSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerState {
    fn settle(&mut self, request: &TransferRequest) -> LedgerResult<TransferReceipt> {
        if !self.registrar.contains(&request.sender) {
            return Err(LedgerError::UnknownIdentity(request.sender.clone()));
        }
        if !self.registrar.contains(&request.receiver) {
            return Err(LedgerError::UnknownIdentity(request.receiver.clone()));
        }
        if request.amount == 0 {
            return Err(LedgerError::InvalidAmount(0));
        }
        if request.sender == request.receiver {
            return Err(LedgerError::SelfTransfer(request.sender.clone()));
        }

        let amount = BioSeconds::new(request.amount);
        self.balances
            .move_balance(&request.sender, &request.receiver, amount)?;
        self.transfers_settled += 1;

        let receipt = TransferReceipt {
            receipt_id: ReceiptId::generate(),
            sender: request.sender.clone(),
            receiver: request.receiver.clone(),
            amount,
            note: request
                .note
                .clone()
                .unwrap_or_else(|| DEFAULT_TRANSFER_NOTE.to_string()),
            fee: TRANSACTION_FEE,
            settled_at: Utc::now(),
        };
        debug!(receipt = %receipt.receipt_id, "journaling transfer");
        self.journal.append(receipt.clone());
        Ok(receipt)
    }
}

/// Request to move seconds between two registered identities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender: IdentityToken,
    pub receiver: IdentityToken,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TransferRequest {
    pub fn new(
        sender: impl Into<IdentityToken>,
        receiver: impl Into<IdentityToken>,
        amount: u64,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Snapshot returned by [`BioCreditSystem::status`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub registered_count: usize,
    pub policy_text: String,
    pub sovereignty: String,
    pub identity_scheme: String,
    pub initial_grant: BioSeconds,
    pub transaction_fee: BioSeconds,
    pub total_supply: BioSeconds,
    pub transfers_settled: u64,
}
