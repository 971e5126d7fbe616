//! Proximity exchange protocol.
//!
//! Two exchange kinds run over a generic framed byte channel provided by
//! the physical transport (NFC, BLE — an external collaborator):
//!
//! - **Profile exchange**: one unsigned contact card frame. No counter, no
//!   signature; this path carries no financial risk.
//! - **Secure payment exchange**: `Select` → `Payment` → `Accept`/`Reject`,
//!   with the responder running the verifier before answering.
//!
//! Every channel operation is bounded by a timeout; nothing here blocks
//! indefinitely, and nothing is retried automatically — a timed-out
//! exchange surfaces as a failed authorization and the caller starts a
//! fresh attempt.

pub mod channel;
pub mod codec;
pub mod error;
pub mod message;
pub mod payment;
pub mod profile;

pub use channel::{ChannelError, FrameChannel};
pub use codec::{decode, encode, MAX_FRAME_SIZE};
pub use error::ExchangeError;
pub use message::{ApplicationId, ContactRecord, ExchangeMessage, PAYMENT_APPLICATION};
pub use payment::{receive_payment, send_payment, PaymentOutcome, ReceivedPayment};
pub use profile::{receive_profile, send_profile};
