//! Verifier (merchant/reader side) state storage trait.

use crate::StoreError;
use nelo_types::WalletId;

/// The counterpart's replay defense: the last accepted counter per payer
/// wallet identity. This is the only state the verifier needs.
pub trait VerifierStore {
    /// Last accepted counter for this identity, or `None` if no payment
    /// from it was ever accepted.
    fn last_accepted_counter(&self, wallet: &WalletId) -> Result<Option<u64>, StoreError>;

    /// Durably record an accepted counter.
    ///
    /// Must be a single atomic write, committed before the acceptance is
    /// observable to the caller — a crash between decision and persistence
    /// must not allow the same counter to be accepted twice.
    fn record_accepted_counter(&self, wallet: &WalletId, counter: u64) -> Result<(), StoreError>;
}
