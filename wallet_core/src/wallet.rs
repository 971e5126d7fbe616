//! The wallet façade owning stores, signer, and identity.

use crate::WalletError;
use nelo_ledger::Ledger;
use nelo_payment::Signer;
use nelo_store::{CounterStore, LedgerEntry, LedgerStore, WalletRecord, WalletStore};
use nelo_types::{Amount, WalletId, WalletParams};
use std::sync::atomic::AtomicBool;
use std::sync::Mutex;

/// One wallet instance: identity, stores, signer, and the locks that
/// serialize its mutations.
///
/// All balance and counter state is explicitly owned here and accessed
/// through the store contracts — there is no ambient global state, and
/// different wallet instances are fully independent.
pub struct OfflineWallet<W, C, L, S>
where
    W: WalletStore,
    C: CounterStore,
    L: LedgerStore,
    S: Signer,
{
    pub(crate) id: WalletId,
    pub(crate) params: WalletParams,
    pub(crate) wallets: W,
    pub(crate) counters: C,
    pub(crate) ledger: Ledger<L>,
    pub(crate) signer: S,
    /// True while a spend attempt is between counter reservation and its
    /// terminal state. A second attempt fails fast instead of interleaving.
    pub(crate) in_flight: AtomicBool,
    /// Serializes balance read-modify-write cycles.
    pub(crate) balance_lock: Mutex<()>,
}

impl<W, C, L, S> OfflineWallet<W, C, L, S>
where
    W: WalletStore,
    C: CounterStore,
    L: LedgerStore,
    S: Signer,
{
    /// Provision a brand-new wallet: writes the initial record with both
    /// balances at zero.
    pub fn provision(
        id: WalletId,
        signer: S,
        params: WalletParams,
        wallets: W,
        counters: C,
        ledger_store: L,
    ) -> Result<Self, WalletError> {
        if wallets.wallet_exists(&id)? {
            return Err(WalletError::AlreadyProvisioned);
        }
        wallets.put_wallet(&WalletRecord::provision(id.clone(), params.currency))?;
        tracing::info!(wallet = %id, "wallet provisioned");
        Ok(Self::assemble(id, signer, params, wallets, counters, ledger_store))
    }

    /// Open an already provisioned wallet.
    pub fn open(
        id: WalletId,
        signer: S,
        params: WalletParams,
        wallets: W,
        counters: C,
        ledger_store: L,
    ) -> Result<Self, WalletError> {
        if !wallets.wallet_exists(&id)? {
            return Err(WalletError::NotProvisioned);
        }
        Ok(Self::assemble(id, signer, params, wallets, counters, ledger_store))
    }

    fn assemble(
        id: WalletId,
        signer: S,
        params: WalletParams,
        wallets: W,
        counters: C,
        ledger_store: L,
    ) -> Self {
        let ledger_cap = params.ledger_cap;
        Self {
            id,
            params,
            wallets,
            counters,
            ledger: Ledger::new(ledger_store, ledger_cap),
            signer,
            in_flight: AtomicBool::new(false),
            balance_lock: Mutex::new(()),
        }
    }

    pub fn id(&self) -> &WalletId {
        &self.id
    }

    pub fn params(&self) -> &WalletParams {
        &self.params
    }

    /// The audit ledger, e.g. for registering `on_append` observers.
    pub fn ledger(&self) -> &Ledger<L> {
        &self.ledger
    }

    pub fn offline_balance(&self) -> Result<Amount, WalletError> {
        Ok(self.wallets.get_wallet(&self.id)?.offline_balance)
    }

    pub fn online_balance(&self) -> Result<Amount, WalletError> {
        Ok(self.wallets.get_wallet(&self.id)?.online_balance)
    }

    /// Audit history, newest first.
    pub fn history(&self) -> Result<Vec<LedgerEntry>, WalletError> {
        Ok(self.ledger.history(&self.id)?)
    }

    /// The counter's current position, for diagnostics display only.
    pub fn counter_position(&self) -> Result<u64, WalletError> {
        Ok(self.counters.peek(&self.id)?)
    }
}
