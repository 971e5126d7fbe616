//! The ledger façade: bounded append, ordered reads, append notifications.

use crate::LedgerError;
use nelo_store::{LedgerEntry, LedgerStore};
use nelo_types::WalletId;
use std::sync::Mutex;

type Observer = Box<dyn Fn(&WalletId, &LedgerEntry) + Send + Sync>;

/// Bounded append-only ledger over any [`LedgerStore`] backend.
///
/// Appends evict the oldest entries beyond the configured cap and notify
/// registered observers (the UI refresh hook).
pub struct Ledger<S: LedgerStore> {
    store: S,
    cap: usize,
    observers: Mutex<Vec<Observer>>,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S, cap: usize) -> Self {
        Self {
            store,
            cap,
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Register a callback invoked after every successful append.
    pub fn on_append(&self, observer: impl Fn(&WalletId, &LedgerEntry) + Send + Sync + 'static) {
        self.observers
            .lock()
            .expect("observer lock poisoned")
            .push(Box::new(observer));
    }

    /// Append an entry, evicting beyond the retention cap.
    ///
    /// Never fails silently: a storage failure propagates so the caller can
    /// treat the surrounding authorization as failed.
    pub fn append(&self, wallet: &WalletId, entry: &LedgerEntry) -> Result<(), LedgerError> {
        self.store.append_entry(wallet, entry)?;
        self.store.evict_oldest(wallet, self.cap)?;
        tracing::debug!(
            wallet = %wallet,
            entry = %entry.id,
            kind = ?entry.kind,
            status = ?entry.status,
            "ledger entry appended"
        );
        for observer in self.observers.lock().expect("observer lock poisoned").iter() {
            observer(wallet, entry);
        }
        Ok(())
    }

    /// Retained entries, newest first.
    ///
    /// Two calls without an intervening append yield identical sequences.
    pub fn history(&self, wallet: &WalletId) -> Result<Vec<LedgerEntry>, LedgerError> {
        let mut entries = self.store.entries(wallet)?;
        entries.reverse();
        // Stable sort: entries sharing a timestamp keep newest-append-first.
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}
