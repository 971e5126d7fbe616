//! Abstract storage traits for the Nelo wallet.
//!
//! Every storage backend (LMDB on device, in-memory for testing) implements
//! these traits. The rest of the workspace depends only on the traits.
//!
//! Each wallet identity's records are independent; there is no cross-wallet
//! shared state, so different wallets may be processed fully in parallel.

pub mod counter;
pub mod error;
pub mod ledger;
pub mod verifier;
pub mod wallet;

pub use counter::CounterStore;
pub use error::StoreError;
pub use ledger::{EntryId, EntryKind, EntryStatus, LedgerEntry, LedgerStore};
pub use verifier::VerifierStore;
pub use wallet::{WalletRecord, WalletStore};
