//! Wallet parameters — the configurable limits of the offline core.

use crate::amount::Amount;
use crate::currency::CurrencyCode;
use serde::{Deserialize, Serialize};

/// Configuration for one wallet instance.
///
/// Loaded from a TOML file by the CLI, or constructed with `Default` for
/// the standard deployment values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletParams {
    /// Maximum value the offline balance may hold (minor units).
    /// Bounds loss exposure when connectivity is unavailable.
    pub offline_ceiling: Amount,

    /// Number of ledger entries retained per wallet; oldest evicted beyond.
    pub ledger_cap: usize,

    /// Upper bound for each proximity channel operation, in milliseconds.
    /// Matches the latency of a physical tap.
    pub exchange_timeout_ms: u64,

    /// Currency new wallets are provisioned in.
    pub currency: CurrencyCode,
}

impl WalletParams {
    /// Standard deployment values.
    pub fn standard() -> Self {
        Self {
            offline_ceiling: Amount::new(50_000),
            ledger_cap: 50,
            exchange_timeout_ms: 3_000,
            currency: CurrencyCode::EUR,
        }
    }
}

impl Default for WalletParams {
    fn default() -> Self {
        Self::standard()
    }
}
