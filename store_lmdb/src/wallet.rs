//! LMDB implementation of the wallet record store.

use crate::LmdbError;
use heed::types::Bytes;
use heed::{Database, Env};
use nelo_store::{StoreError, WalletRecord, WalletStore};
use nelo_types::WalletId;
use std::sync::Arc;

pub struct LmdbWalletStore {
    pub(crate) env: Arc<Env>,
    pub(crate) db: Database<Bytes, Bytes>,
}

impl WalletStore for LmdbWalletStore {
    fn get_wallet(&self, id: &WalletId) -> Result<WalletRecord, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .db
            .get(&rtxn, id.as_str().as_bytes())
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(id.to_string()))?;
        let record = bincode::deserialize(bytes)
            .map_err(|e| LmdbError::Serialization(e.to_string()))?;
        Ok(record)
    }

    fn put_wallet(&self, record: &WalletRecord) -> Result<(), StoreError> {
        let bytes =
            bincode::serialize(record).map_err(|e| LmdbError::Serialization(e.to_string()))?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.db
            .put(&mut wtxn, record.id.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn wallet_exists(&self, id: &WalletId) -> Result<bool, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self
            .db
            .get(&rtxn, id.as_str().as_bytes())
            .map_err(LmdbError::from)?
            .is_some())
    }
}
