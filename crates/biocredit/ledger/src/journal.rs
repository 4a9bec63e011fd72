use std::collections::VecDeque;

use biocredit_types::{IdentityToken, TransferReceipt};
use serde::{Deserialize, Serialize};

/// Transfer journal configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Receipts retained before the oldest are dropped. Zero keeps none.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_capacity() -> usize {
    10_000
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            capacity: default_capacity(),
        }
    }
}

/// Bounded, append-only record of settled transfers. Held in memory only.
#[derive(Debug)]
pub struct TransferJournal {
    config: JournalConfig,
    receipts: VecDeque<TransferReceipt>,
}

impl TransferJournal {
    pub fn new(config: JournalConfig) -> Self {
        Self {
            config,
            receipts: VecDeque::new(),
        }
    }

    pub fn append(&mut self, receipt: TransferReceipt) {
        if !self.config.enabled || self.config.capacity == 0 {
            return;
        }
        while self.receipts.len() >= self.config.capacity {
            self.receipts.pop_front();
        }
        self.receipts.push_back(receipt);
    }

    /// Receipts involving `token`, newest first.
    pub fn involving(&self, token: &IdentityToken, limit: Option<usize>) -> Vec<TransferReceipt> {
        self.receipts
            .iter()
            .rev()
            .filter(|receipt| receipt.involves(token))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }
}

impl Default for TransferJournal {
    fn default() -> Self {
        Self::new(JournalConfig::default())
    }
}
