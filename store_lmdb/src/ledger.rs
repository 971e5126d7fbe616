//! LMDB implementation of the ledger entry store.
//!
//! Each wallet's retained entries are stored as one bincode row in append
//! order. The retention window is small (tens of entries), so a
//! read-modify-write per append is cheaper than a key-per-entry layout and
//! keeps append + eviction trivially atomic.

use crate::LmdbError;
use heed::types::Bytes;
use heed::{Database, Env};
use nelo_store::{LedgerEntry, LedgerStore, StoreError};
use nelo_types::WalletId;
use std::sync::Arc;

pub struct LmdbLedgerStore {
    pub(crate) env: Arc<Env>,
    pub(crate) db: Database<Bytes, Bytes>,
}

impl LmdbLedgerStore {
    fn read_entries(
        &self,
        txn: &heed::RoTxn,
        wallet: &WalletId,
    ) -> Result<Vec<LedgerEntry>, LmdbError> {
        match self.db.get(txn, wallet.as_str().as_bytes())? {
            Some(bytes) => {
                bincode::deserialize(bytes).map_err(|e| LmdbError::Serialization(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }
}

impl LedgerStore for LmdbLedgerStore {
    fn append_entry(&self, wallet: &WalletId, entry: &LedgerEntry) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut entries = self.read_entries(&wtxn, wallet)?;
        entries.push(entry.clone());
        let bytes =
            bincode::serialize(&entries).map_err(|e| LmdbError::Serialization(e.to_string()))?;
        self.db
            .put(&mut wtxn, wallet.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn entries(&self, wallet: &WalletId) -> Result<Vec<LedgerEntry>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.read_entries(&rtxn, wallet)?)
    }

    fn evict_oldest(&self, wallet: &WalletId, keep: usize) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut entries = self.read_entries(&wtxn, wallet)?;
        if entries.len() <= keep {
            return Ok(());
        }
        let excess = entries.len() - keep;
        entries.drain(..excess);
        let bytes =
            bincode::serialize(&entries).map_err(|e| LmdbError::Serialization(e.to_string()))?;
        self.db
            .put(&mut wtxn, wallet.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LmdbEnvironment;
    use nelo_store::{EntryId, EntryKind, EntryStatus};
    use nelo_types::{Amount, CurrencyCode, Timestamp};

    fn entry(ts: u64) -> LedgerEntry {
        LedgerEntry {
            id: EntryId::random(),
            kind: EntryKind::Payment,
            status: EntryStatus::Success,
            amount: Some(Amount::new(100)),
            currency: Some(CurrencyCode::EUR),
            timestamp: Timestamp::new(ts),
            metadata: None,
        }
    }

    #[test]
    fn append_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path()).unwrap();
        let store = env.ledger_store();
        let w = WalletId::new("nelo_ledger_lmdb".to_string());

        for ts in [1, 2, 3] {
            store.append_entry(&w, &entry(ts)).unwrap();
        }
        let stamps: Vec<u64> = store
            .entries(&w)
            .unwrap()
            .iter()
            .map(|e| e.timestamp.as_millis())
            .collect();
        assert_eq!(stamps, vec![1, 2, 3]);
    }

    #[test]
    fn evict_drops_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path()).unwrap();
        let store = env.ledger_store();
        let w = WalletId::new("nelo_ledger_evict".to_string());

        for ts in 1..=5u64 {
            store.append_entry(&w, &entry(ts)).unwrap();
        }
        store.evict_oldest(&w, 2).unwrap();
        let stamps: Vec<u64> = store
            .entries(&w)
            .unwrap()
            .iter()
            .map(|e| e.timestamp.as_millis())
            .collect();
        assert_eq!(stamps, vec![4, 5]);
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let w = WalletId::new("nelo_ledger_durable".to_string());
        {
            let env = LmdbEnvironment::open(dir.path()).unwrap();
            env.ledger_store().append_entry(&w, &entry(42)).unwrap();
        }
        let env = LmdbEnvironment::open(dir.path()).unwrap();
        let entries = env.ledger_store().entries(&w).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp.as_millis(), 42);
    }
}
