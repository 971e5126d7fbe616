//! Ledger entry types and storage trait.

use crate::StoreError;
use nelo_types::{Amount, CurrencyCode, Timestamp, WalletId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 16-byte random ledger entry identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId([u8; 16]);

impl EntryId {
    pub fn random() -> Self {
        Self(rand::random())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", &hex::encode(self.0)[..8])
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// What a ledger entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// An offline spend authorization attempt (either outcome).
    Payment,
    /// External funding into the online balance.
    Recharge,
    /// A contact card sent over a proximity exchange.
    ProfileShare,
    /// Inbound proximity data: a received payment or contact card.
    Receive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    Success,
    Failed,
}

/// One audit record. Append-only; failures are recorded too, even when
/// financially inert, so the log accounts for every authorization attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub kind: EntryKind,
    pub status: EntryStatus,
    pub amount: Option<Amount>,
    pub currency: Option<CurrencyCode>,
    pub timestamp: Timestamp,
    /// Free-form context: transaction id, rejection reason, counterpart.
    pub metadata: Option<String>,
}

/// Trait for per-wallet ledger storage.
///
/// Entries are stored in append order. The bounded retention window is
/// enforced by the ledger façade, not the backend.
pub trait LedgerStore {
    /// Append an entry. Must not fail silently — the caller treats an
    /// append failure as a failed authorization, because an un-logged
    /// success is unauditable.
    fn append_entry(&self, wallet: &WalletId, entry: &LedgerEntry) -> Result<(), StoreError>;

    /// All retained entries in append order (oldest first).
    fn entries(&self, wallet: &WalletId) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Drop the oldest entries until at most `keep` remain.
    fn evict_oldest(&self, wallet: &WalletId, keep: usize) -> Result<(), StoreError>;
}
