//! In-process frame channel — a proximity tap without hardware.

use nelo_exchange::{ChannelError, FrameChannel};
use tokio::sync::mpsc;

/// One endpoint of an in-memory duplex channel.
///
/// `NullChannel::pair()` yields two connected endpoints; frames sent on one
/// arrive on the other in order. Dropping an endpoint closes the link, so a
/// receiver observes `ChannelError::Closed` rather than hanging.
pub struct NullChannel {
    tx: mpsc::UnboundedSender<Vec<u8>>,
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl NullChannel {
    /// Create two connected endpoints.
    pub fn pair() -> (NullChannel, NullChannel) {
        let (a_tx, a_rx) = mpsc::unbounded_channel();
        let (b_tx, b_rx) = mpsc::unbounded_channel();
        (
            NullChannel { tx: a_tx, rx: b_rx },
            NullChannel { tx: b_tx, rx: a_rx },
        )
    }
}

impl FrameChannel for NullChannel {
    async fn send(&mut self, frame: Vec<u8>) -> Result<(), ChannelError> {
        self.tx.send(frame).map_err(|_| ChannelError::Closed)
    }

    async fn recv(&mut self) -> Result<Vec<u8>, ChannelError> {
        self.rx.recv().await.ok_or(ChannelError::Closed)
    }
}
