//! LMDB implementation of the verifier (reader-side) state store.

use crate::LmdbError;
use heed::types::Bytes;
use heed::{Database, Env};
use nelo_store::{StoreError, VerifierStore};
use nelo_types::WalletId;
use std::sync::Arc;

pub struct LmdbVerifierStore {
    pub(crate) env: Arc<Env>,
    pub(crate) db: Database<Bytes, Bytes>,
}

impl VerifierStore for LmdbVerifierStore {
    fn last_accepted_counter(&self, wallet: &WalletId) -> Result<Option<u64>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .db
            .get(&rtxn, wallet.as_str().as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let arr: [u8; 8] = bytes.try_into().map_err(|_| {
                    LmdbError::Serialization("counter has unexpected byte length".to_string())
                })?;
                Ok(Some(u64::from_be_bytes(arr)))
            }
            None => Ok(None),
        }
    }

    fn record_accepted_counter(&self, wallet: &WalletId, counter: u64) -> Result<(), StoreError> {
        // One put, one commit: the acceptance is durable before the caller
        // can observe it.
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.db
            .put(&mut wtxn, wallet.as_str().as_bytes(), &counter.to_be_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
