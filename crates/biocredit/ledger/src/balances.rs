use std::collections::HashMap;

use biocredit_types::{BioSeconds, IdentityToken};

use crate::error::{LedgerError, LedgerResult};

/// Token to balance mapping.
///
/// `total` always equals the sum of all balances. Transfers move value
/// between entries and never change it; only [`BalanceSheet::open`] does.
#[derive(Debug, Default)]
pub struct BalanceSheet {
    balances: HashMap<IdentityToken, BioSeconds>,
    total: BioSeconds,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entry holding `grant`.
    pub fn open(&mut self, token: &IdentityToken, grant: BioSeconds) -> LedgerResult<()> {
        if self.balances.contains_key(token) {
            return Err(LedgerError::DuplicateIdentity(token.clone()));
        }
        let total = self
            .total
            .checked_add(grant)
            .ok_or_else(|| LedgerError::BalanceOverflow(token.clone()))?;
        self.balances.insert(token.clone(), grant);
        self.total = total;
        Ok(())
    }

    pub fn balance(&self, token: &IdentityToken) -> Option<BioSeconds> {
        self.balances.get(token).copied()
    }

    pub fn contains(&self, token: &IdentityToken) -> bool {
        self.balances.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn total(&self) -> BioSeconds {
        self.total
    }

    /// Debit `sender` and credit `receiver`.
    ///
    /// Both entries must exist and differ. Either both balances change or
    /// neither does.
    pub fn move_balance(
        &mut self,
        sender: &IdentityToken,
        receiver: &IdentityToken,
        amount: BioSeconds,
    ) -> LedgerResult<()> {
        let available = self
            .balance(sender)
            .ok_or_else(|| LedgerError::UnknownIdentity(sender.clone()))?;
        let credited = self
            .balance(receiver)
            .ok_or_else(|| LedgerError::UnknownIdentity(receiver.clone()))?;

        let debited = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientBalance {
                token: sender.clone(),
                available,
                requested: amount,
            })?;
        let credited = credited
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(receiver.clone()))?;

        self.balances.insert(sender.clone(), debited);
        self.balances.insert(receiver.clone(), credited);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IdentityToken, &BioSeconds)> {
        self.balances.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with(entries: &[(&str, u64)]) -> BalanceSheet {
        let mut sheet = BalanceSheet::new();
        for (token, grant) in entries {
            sheet
                .open(&IdentityToken::new(*token), BioSeconds::new(*grant))
                .unwrap();
        }
        sheet
    }

    #[test]
    fn open_tracks_total() {
        let sheet = sheet_with(&[("a", 10), ("b", 5)]);
        assert_eq!(sheet.total(), BioSeconds::new(15));
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn open_twice_is_duplicate() {
        let mut sheet = sheet_with(&[("a", 10)]);
        let result = sheet.open(&IdentityToken::new("a"), BioSeconds::new(1));
        assert!(matches!(result, Err(LedgerError::DuplicateIdentity(_))));
        assert_eq!(sheet.balance(&IdentityToken::new("a")), Some(BioSeconds::new(10)));
    }

    #[test]
    fn open_refuses_supply_overflow() {
        let mut sheet = sheet_with(&[("a", u64::MAX)]);
        let result = sheet.open(&IdentityToken::new("b"), BioSeconds::new(1));
        assert!(matches!(result, Err(LedgerError::BalanceOverflow(_))));
        assert!(!sheet.contains(&IdentityToken::new("b")));
    }

    #[test]
    fn move_balance_is_all_or_nothing() {
        let mut sheet = sheet_with(&[("a", 10), ("b", 0)]);
        let a = IdentityToken::new("a");
        let b = IdentityToken::new("b");

        sheet.move_balance(&a, &b, BioSeconds::new(4)).unwrap();
        assert_eq!(sheet.balance(&a), Some(BioSeconds::new(6)));
        assert_eq!(sheet.balance(&b), Some(BioSeconds::new(4)));

        let result = sheet.move_balance(&a, &b, BioSeconds::new(7));
        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
        assert_eq!(sheet.balance(&a), Some(BioSeconds::new(6)));
        assert_eq!(sheet.balance(&b), Some(BioSeconds::new(4)));
        assert_eq!(sheet.total(), BioSeconds::new(10));
    }

    #[test]
    fn move_balance_to_missing_entry_creates_nothing() {
        let mut sheet = sheet_with(&[("a", 10)]);
        let result = sheet.move_balance(
            &IdentityToken::new("a"),
            &IdentityToken::new("ghost"),
            BioSeconds::new(1),
        );
        assert!(matches!(result, Err(LedgerError::UnknownIdentity(t)) if t.as_str() == "ghost"));
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.balance(&IdentityToken::new("a")), Some(BioSeconds::new(10)));
    }
}
