//! Balance mutation entry points: recharge and online→offline transfer.

use crate::wallet::OfflineWallet;
use crate::WalletError;
use nelo_payment::Signer;
use nelo_store::{
    CounterStore, EntryId, EntryKind, EntryStatus, LedgerEntry, LedgerStore, WalletStore,
};
use nelo_types::{Amount, Timestamp};

impl<W, C, L, S> OfflineWallet<W, C, L, S>
where
    W: WalletStore,
    C: CounterStore,
    L: LedgerStore,
    S: Signer,
{
    /// External funding into the online balance.
    ///
    /// Returns the new online balance and records a `Recharge` entry.
    pub fn recharge(&self, amount: Amount) -> Result<Amount, WalletError> {
        if amount.is_zero() {
            return Err(WalletError::InvalidAmount);
        }
        let new_balance = {
            let _guard = self.balance_lock.lock().expect("balance lock poisoned");
            let mut record = self.wallets.get_wallet(&self.id)?;
            record.online_balance = record
                .online_balance
                .checked_add(amount)
                .ok_or(WalletError::BalanceOverflow)?;
            self.wallets.put_wallet(&record)?;
            record.online_balance
        };
        tracing::info!(wallet = %self.id, %amount, %new_balance, "recharged");
        self.ledger.append(
            &self.id,
            &LedgerEntry {
                id: EntryId::random(),
                kind: EntryKind::Recharge,
                status: EntryStatus::Success,
                amount: Some(amount),
                currency: Some(self.params.currency),
                timestamp: Timestamp::now(),
                metadata: None,
            },
        )?;
        Ok(new_balance)
    }

    /// Move funds from the online balance into the offline wallet.
    ///
    /// Both preconditions are checked before either balance moves: the
    /// online balance must cover the amount, and the offline balance plus
    /// the amount must stay within the configured ceiling. The two balances
    /// change in a single record commit.
    pub fn transfer_online_to_offline(&self, amount: Amount) -> Result<(), WalletError> {
        if amount.is_zero() {
            return Err(WalletError::InvalidAmount);
        }
        let _guard = self.balance_lock.lock().expect("balance lock poisoned");
        let mut record = self.wallets.get_wallet(&self.id)?;

        if amount > record.online_balance {
            return Err(WalletError::InsufficientOnlineBalance {
                needed: amount,
                available: record.online_balance,
            });
        }
        let new_offline = record
            .offline_balance
            .checked_add(amount)
            .ok_or(WalletError::BalanceOverflow)?;
        if new_offline > self.params.offline_ceiling {
            return Err(WalletError::OfflineCeilingExceeded {
                would_hold: new_offline,
                ceiling: self.params.offline_ceiling,
            });
        }

        record.online_balance = record
            .online_balance
            .checked_sub(amount)
            .expect("checked against online balance above");
        record.offline_balance = new_offline;
        self.wallets.put_wallet(&record)?;
        tracing::info!(
            wallet = %self.id,
            %amount,
            online = %record.online_balance,
            offline = %record.offline_balance,
            "transferred online→offline"
        );
        Ok(())
    }
}
