//! Wallet balance storage trait.

use crate::StoreError;
use nelo_types::{Amount, CurrencyCode, WalletId};
use serde::{Deserialize, Serialize};

/// The persisted balance row for one wallet.
///
/// Mutated only through the wallet-core operations (spend settlement,
/// recharge, online→offline transfer) — never directly by presentation
/// code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub id: WalletId,
    /// Spendable with connectivity. Non-negative.
    pub online_balance: Amount,
    /// Pre-loaded for proximity spending. Bounded by the offline ceiling.
    pub offline_balance: Amount,
    pub currency: CurrencyCode,
}

impl WalletRecord {
    /// A freshly provisioned wallet: both balances zero.
    pub fn provision(id: WalletId, currency: CurrencyCode) -> Self {
        Self {
            id,
            online_balance: Amount::ZERO,
            offline_balance: Amount::ZERO,
            currency,
        }
    }
}

/// Trait for wallet record storage.
pub trait WalletStore {
    fn get_wallet(&self, id: &WalletId) -> Result<WalletRecord, StoreError>;

    /// Persist the record. The write must commit atomically — a reader
    /// never observes a half-updated pair of balances.
    fn put_wallet(&self, record: &WalletRecord) -> Result<(), StoreError>;

    fn wallet_exists(&self, id: &WalletId) -> Result<bool, StoreError>;
}
