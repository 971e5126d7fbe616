use crate::channel::ChannelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    /// No response within the configured bound — the tap was broken off.
    #[error("channel timeout")]
    ChannelTimeout,

    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error("message too large: {size} > {max}")]
    MessageTooLarge { size: usize, max: usize },

    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("verification error: {0}")]
    Verify(#[from] nelo_verification::VerifyError),

    #[error("ledger error: {0}")]
    Ledger(#[from] nelo_ledger::LedgerError),
}
