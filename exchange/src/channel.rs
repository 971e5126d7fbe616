//! The transport abstraction the proximity hardware plugs into.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel closed by peer")]
    Closed,

    #[error("transport error: {0}")]
    Transport(String),
}

/// A bidirectional channel carrying pre-negotiated framed messages.
///
/// Implemented by the physical transport layer (and by the in-memory
/// test double). Both operations may wait on the peer; the exchange
/// drivers wrap every call in a timeout, so implementations are free to
/// pend indefinitely.
#[allow(async_fn_in_trait)]
pub trait FrameChannel {
    /// Transmit one frame.
    async fn send(&mut self, frame: Vec<u8>) -> Result<(), ChannelError>;

    /// Wait for the next frame from the peer.
    async fn recv(&mut self) -> Result<Vec<u8>, ChannelError>;
}
