use nelo_exchange::ExchangeError;
use nelo_ledger::LedgerError;
use nelo_payment::SignerError;
use nelo_store::StoreError;
use nelo_types::Amount;
use nelo_verification::RejectReason;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("amount must be positive")]
    InvalidAmount,

    #[error("insufficient offline balance: need {needed}, have {available}")]
    InsufficientOfflineBalance { needed: Amount, available: Amount },

    #[error("insufficient online balance: need {needed}, have {available}")]
    InsufficientOnlineBalance { needed: Amount, available: Amount },

    #[error("offline ceiling exceeded: would hold {would_hold}, ceiling {ceiling}")]
    OfflineCeilingExceeded { would_hold: Amount, ceiling: Amount },

    #[error("online balance overflow")]
    BalanceOverflow,

    #[error("another authorization is already in flight")]
    AuthorizationInProgress,

    #[error("wallet already provisioned")]
    AlreadyProvisioned,

    #[error("wallet not provisioned")]
    NotProvisioned,

    #[error("payment rejected by peer: {0}")]
    PeerRejected(RejectReason),

    #[error("exchange failed: {0}")]
    Exchange(#[from] ExchangeError),

    #[error("signing error: {0}")]
    Signing(#[from] SignerError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
