//! Monotonic counter storage trait.

use crate::StoreError;
use nelo_types::WalletId;

/// Durable, strictly increasing counter per wallet identity — the single
/// source of truth against replay.
///
/// Created at wallet provisioning (starting at 0, so the first `next` call
/// yields 1); never reset outside an explicit audited wallet reset.
pub trait CounterStore {
    /// Atomically read the last value, increment, durably persist, and
    /// return the new value.
    ///
    /// The returned value must be observable only after the durable write
    /// has committed: a caller that signs a payload with an unconfirmed
    /// counter risks a false replay window after a crash. `next` never
    /// returns the same value twice, even across process restarts.
    ///
    /// Implementations must be safe under concurrent callers for the same
    /// wallet (single-writer lock or equivalent), even though the
    /// authorizer serializes legitimate attempts — this defends against
    /// accidental double invocation.
    fn next(&self, wallet: &WalletId) -> Result<u64, StoreError>;

    /// Read the current value without consuming it.
    ///
    /// Diagnostics only — a peeked value must never be embedded in a
    /// payload.
    fn peek(&self, wallet: &WalletId) -> Result<u64, StoreError>;
}
