//! LMDB environment setup.

use crate::{LmdbCounterStore, LmdbError, LmdbLedgerStore, LmdbVerifierStore, LmdbWalletStore};
use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use std::path::Path;
use std::sync::Arc;

/// Current on-disk schema version.
const SCHEMA_VERSION: u32 = 1;
const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

/// Default map size: 64 MiB, far beyond what a bounded wallet ever holds.
const MAP_SIZE: usize = 64 * 1024 * 1024;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    wallets_db: Database<Bytes, Bytes>,
    counters_db: Database<Bytes, Bytes>,
    ledger_db: Database<Bytes, Bytes>,
    verifier_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// Stamps the schema version on first open; refuses to open data
    /// written by a newer schema.
    pub fn open(path: &Path) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path).map_err(|e| LmdbError::Heed(e.to_string()))?;

        // Safety: nothing else in this process maps the same path; heed
        // marks `open` unsafe because aliasing the map would be UB.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(MAP_SIZE)
                .max_dbs(5)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let wallets_db = env.create_database(&mut wtxn, Some("wallets"))?;
        let counters_db = env.create_database(&mut wtxn, Some("counters"))?;
        let ledger_db = env.create_database(&mut wtxn, Some("ledger"))?;
        let verifier_db = env.create_database(&mut wtxn, Some("verifier"))?;
        let meta_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some("meta"))?;

        match meta_db.get(&wtxn, SCHEMA_VERSION_KEY)? {
            None => {
                meta_db.put(&mut wtxn, SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_le_bytes())?;
            }
            Some(bytes) => {
                let found = match <[u8; 4]>::try_from(bytes) {
                    Ok(arr) => u32::from_le_bytes(arr),
                    Err(_) => {
                        return Err(LmdbError::Serialization(
                            "schema_version has unexpected byte length".to_string(),
                        ))
                    }
                };
                if found > SCHEMA_VERSION {
                    return Err(LmdbError::SchemaTooNew {
                        found,
                        supported: SCHEMA_VERSION,
                    });
                }
            }
        }
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "LMDB environment opened");
        Ok(Self {
            env: Arc::new(env),
            wallets_db,
            counters_db,
            ledger_db,
            verifier_db,
            meta_db,
        })
    }

    pub fn wallet_store(&self) -> LmdbWalletStore {
        LmdbWalletStore {
            env: self.env.clone(),
            db: self.wallets_db,
        }
    }

    pub fn counter_store(&self) -> LmdbCounterStore {
        LmdbCounterStore {
            env: self.env.clone(),
            db: self.counters_db,
        }
    }

    pub fn ledger_store(&self) -> LmdbLedgerStore {
        LmdbLedgerStore {
            env: self.env.clone(),
            db: self.ledger_db,
        }
    }

    pub fn verifier_store(&self) -> LmdbVerifierStore {
        LmdbVerifierStore {
            env: self.env.clone(),
            db: self.verifier_db,
        }
    }

    /// The stored schema version.
    pub fn schema_version(&self) -> Result<u32, LmdbError> {
        let rtxn = self.env.read_txn()?;
        match self.meta_db.get(&rtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) if bytes.len() == 4 => {
                let arr: [u8; 4] = bytes.try_into().expect("checked length");
                Ok(u32::from_le_bytes(arr))
            }
            _ => Ok(0),
        }
    }
}
