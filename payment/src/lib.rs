//! Offline payment payloads and signing.
//!
//! A spend attempt drafts a [`PaymentDraft`], has it signed through the
//! [`Signer`] contract, and ships the resulting [`TransactionPayload`] to
//! the counterpart device. The canonical byte encoding the signature covers
//! is defined once in [`canonical`] and shared by signer and verifier — it
//! must never drift.

pub mod canonical;
pub mod payload;
pub mod signer;

pub use canonical::signing_bytes;
pub use payload::{PaymentDraft, TransactionPayload, TxId};
pub use signer::{DeviceSigner, Signer, SignerError};
