//! Payload verification against signature and counter freshness.

use crate::VerifyError;
use nelo_crypto::{decode_wallet_id, verify_signature};
use nelo_payment::{signing_bytes, TransactionPayload};
use nelo_store::VerifierStore;
use nelo_types::WalletId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a payload was rejected. Carried back to the initiator on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Signature does not match the canonical encoding under the sender's key.
    BadSignature,
    /// Counter not strictly greater than the last accepted one — a replay
    /// or a stale payload.
    ReplayOrStale,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadSignature => write!(f, "bad signature"),
            Self::ReplayOrStale => write!(f, "replay or stale counter"),
        }
    }
}

/// The verification outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(RejectReason),
}

/// Validates received payloads for one reader device.
///
/// Counter state updates only on acceptance, durably, before the accept is
/// returned; rejections never mutate anything.
pub struct Verifier<S: VerifierStore> {
    store: S,
}

impl<S: VerifierStore> Verifier<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Verify a payload claimed to come from `sender`.
    ///
    /// 1. Recover the sender's public key from the wallet identity (the
    ///    identity embeds it; an undecodable identity cannot have signed
    ///    anything).
    /// 2. Check the signature over the canonical encoding.
    /// 3. Check `payload.counter > last_accepted_counter`.
    /// 4. On accept, persist the new counter before returning.
    pub fn verify(
        &self,
        payload: &TransactionPayload,
        sender: &WalletId,
    ) -> Result<Verdict, VerifyError> {
        let Some(public_key) = decode_wallet_id(sender) else {
            tracing::warn!(sender = %sender, "undecodable wallet identity");
            return Ok(Verdict::Reject(RejectReason::BadSignature));
        };

        let message = signing_bytes(&payload.draft());
        if !verify_signature(&message, &payload.signature, &public_key) {
            tracing::warn!(sender = %sender, tx = %payload.id, "signature mismatch");
            return Ok(Verdict::Reject(RejectReason::BadSignature));
        }

        let last = self.store.last_accepted_counter(sender)?.unwrap_or(0);
        if payload.counter <= last {
            tracing::warn!(
                sender = %sender,
                tx = %payload.id,
                counter = payload.counter,
                last_accepted = last,
                "replayed or stale counter"
            );
            return Ok(Verdict::Reject(RejectReason::ReplayOrStale));
        }

        // Durable before the accept is observable; a crash here must not
        // open a window for the same counter to be accepted twice.
        self.store.record_accepted_counter(sender, payload.counter)?;
        tracing::info!(sender = %sender, tx = %payload.id, counter = payload.counter, "payload accepted");
        Ok(Verdict::Accept)
    }
}
