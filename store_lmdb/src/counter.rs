//! LMDB implementation of the monotonic counter store.

use crate::LmdbError;
use heed::types::Bytes;
use heed::{Database, Env};
use nelo_store::{CounterStore, StoreError};
use nelo_types::WalletId;
use std::sync::Arc;

pub struct LmdbCounterStore {
    pub(crate) env: Arc<Env>,
    pub(crate) db: Database<Bytes, Bytes>,
}

fn decode_counter(bytes: &[u8]) -> Result<u64, LmdbError> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| LmdbError::Serialization("counter has unexpected byte length".to_string()))?;
    Ok(u64::from_be_bytes(arr))
}

impl CounterStore for LmdbCounterStore {
    fn next(&self, wallet: &WalletId) -> Result<u64, StoreError> {
        // LMDB allows a single writer at a time; the read-increment-write
        // below is therefore atomic with respect to other callers, and the
        // new value is durable once commit returns.
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let current = match self
            .db
            .get(&wtxn, wallet.as_str().as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => decode_counter(bytes)?,
            None => 0,
        };
        let next = current + 1;
        self.db
            .put(&mut wtxn, wallet.as_str().as_bytes(), &next.to_be_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(next)
    }

    fn peek(&self, wallet: &WalletId) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .db
            .get(&rtxn, wallet.as_str().as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(decode_counter(bytes)?),
            None => Ok(0),
        }
    }
}
