//! LMDB storage backend for the Nelo wallet.
//!
//! Implements the storage traits from `nelo-store` using the `heed` LMDB
//! bindings. All databases live in a single environment per data
//! directory, so every committed state the wallet can observe comes from
//! one coherent transaction history — counter and balance state can never
//! diverge across files. Each contract-level mutation is one committed
//! write transaction.

pub mod counter;
pub mod environment;
pub mod error;
pub mod ledger;
pub mod verifier;
pub mod wallet;

pub use counter::LmdbCounterStore;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use ledger::LmdbLedgerStore;
pub use verifier::LmdbVerifierStore;
pub use wallet::LmdbWalletStore;
