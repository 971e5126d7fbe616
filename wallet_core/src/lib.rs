//! Wallet core for the Nelo dual-balance wallet.
//!
//! Owns the balance invariants and the offline spend authorization flow:
//! - balance accessors and mutation entry points (`recharge`,
//!   `transfer_online_to_offline`) with the non-negativity and ceiling
//!   invariants;
//! - the spend authorizer: amount validation, counter reservation, signing,
//!   the proximity exchange, and settlement — with at most one attempt in
//!   flight per wallet;
//! - audit bookkeeping: every terminal outcome lands in the ledger.
//!
//! Presentation code never mutates balances directly; everything goes
//! through [`OfflineWallet`].

pub mod authorizer;
pub mod balance;
pub mod error;
pub mod wallet;

pub use error::WalletError;
pub use wallet::OfflineWallet;
