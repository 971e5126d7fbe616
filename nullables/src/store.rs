//! In-memory storage implementing every storage trait.
//!
//! Thread-safe so it can back tests running on tokio's multi-threaded
//! runtime. "Durability" is the lifetime of the struct, which is exactly
//! what a test wants to control.

use nelo_store::{
    CounterStore, LedgerEntry, LedgerStore, StoreError, VerifierStore, WalletRecord, WalletStore,
};
use nelo_types::WalletId;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory store for testing.
#[derive(Default)]
pub struct MemoryStore {
    wallets: Mutex<HashMap<String, WalletRecord>>,
    counters: Mutex<HashMap<String, u64>>,
    ledgers: Mutex<HashMap<String, Vec<LedgerEntry>>>,
    accepted: Mutex<HashMap<String, u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WalletStore for MemoryStore {
    fn get_wallet(&self, id: &WalletId) -> Result<WalletRecord, StoreError> {
        self.wallets
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn put_wallet(&self, record: &WalletRecord) -> Result<(), StoreError> {
        self.wallets
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn wallet_exists(&self, id: &WalletId) -> Result<bool, StoreError> {
        Ok(self.wallets.lock().unwrap().contains_key(id.as_str()))
    }
}

impl CounterStore for MemoryStore {
    fn next(&self, wallet: &WalletId) -> Result<u64, StoreError> {
        let mut counters = self.counters.lock().unwrap();
        let slot = counters.entry(wallet.as_str().to_string()).or_insert(0);
        *slot += 1;
        Ok(*slot)
    }

    fn peek(&self, wallet: &WalletId) -> Result<u64, StoreError> {
        Ok(self
            .counters
            .lock()
            .unwrap()
            .get(wallet.as_str())
            .copied()
            .unwrap_or(0))
    }
}

impl LedgerStore for MemoryStore {
    fn append_entry(&self, wallet: &WalletId, entry: &LedgerEntry) -> Result<(), StoreError> {
        self.ledgers
            .lock()
            .unwrap()
            .entry(wallet.as_str().to_string())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    fn entries(&self, wallet: &WalletId) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(self
            .ledgers
            .lock()
            .unwrap()
            .get(wallet.as_str())
            .cloned()
            .unwrap_or_default())
    }

    fn evict_oldest(&self, wallet: &WalletId, keep: usize) -> Result<(), StoreError> {
        let mut ledgers = self.ledgers.lock().unwrap();
        if let Some(entries) = ledgers.get_mut(wallet.as_str()) {
            if entries.len() > keep {
                let excess = entries.len() - keep;
                entries.drain(..excess);
            }
        }
        Ok(())
    }
}

impl VerifierStore for MemoryStore {
    fn last_accepted_counter(&self, wallet: &WalletId) -> Result<Option<u64>, StoreError> {
        Ok(self.accepted.lock().unwrap().get(wallet.as_str()).copied())
    }

    fn record_accepted_counter(&self, wallet: &WalletId, counter: u64) -> Result<(), StoreError> {
        self.accepted
            .lock()
            .unwrap()
            .insert(wallet.as_str().to_string(), counter);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nelo_types::CurrencyCode;

    fn wallet() -> WalletId {
        WalletId::new("nelo_memory_test".to_string())
    }

    #[test]
    fn counter_is_monotonic() {
        let store = MemoryStore::new();
        let w = wallet();
        assert_eq!(store.peek(&w).unwrap(), 0);
        assert_eq!(store.next(&w).unwrap(), 1);
        assert_eq!(store.next(&w).unwrap(), 2);
        assert_eq!(store.peek(&w).unwrap(), 2);
    }

    #[test]
    fn counters_are_scoped_per_wallet() {
        let store = MemoryStore::new();
        let a = WalletId::new("nelo_a".to_string());
        let b = WalletId::new("nelo_b".to_string());
        assert_eq!(store.next(&a).unwrap(), 1);
        assert_eq!(store.next(&a).unwrap(), 2);
        assert_eq!(store.next(&b).unwrap(), 1);
    }

    #[test]
    fn wallet_roundtrip() {
        let store = MemoryStore::new();
        let record = WalletRecord::provision(wallet(), CurrencyCode::EUR);
        assert!(!store.wallet_exists(&record.id).unwrap());
        store.put_wallet(&record).unwrap();
        assert!(store.wallet_exists(&record.id).unwrap());
        assert_eq!(store.get_wallet(&record.id).unwrap(), record);
    }

    #[test]
    fn missing_wallet_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.get_wallet(&wallet()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn verifier_state_updates() {
        let store = MemoryStore::new();
        let w = wallet();
        assert_eq!(store.last_accepted_counter(&w).unwrap(), None);
        store.record_accepted_counter(&w, 9).unwrap();
        assert_eq!(store.last_accepted_counter(&w).unwrap(), Some(9));
    }
}
