//! Canonical signing encoding — frozen.
//!
//! Signer and verifier must compute identical signature inputs, so the
//! encoding is hand-rolled here rather than derived from a serializer whose
//! output could shift between versions. Layout, in order:
//!
//! ```text
//! domain tag   8 bytes   "NELO-TX1"
//! id          16 bytes   raw
//! amount       8 bytes   u64 big-endian minor units
//! currency     2 bytes   u16 big-endian byte length, then UTF-8 bytes
//! timestamp    8 bytes   u64 big-endian Unix milliseconds
//! counter      8 bytes   u64 big-endian
//! ```
//!
//! Any change here is a wire break between signer and verifier populations;
//! a new layout needs a new domain tag.

use crate::payload::PaymentDraft;

/// Domain separation tag, versioned.
pub const DOMAIN_TAG: &[u8; 8] = b"NELO-TX1";

/// Serialize the unsigned payload fields into the canonical byte string the
/// signature covers.
pub fn signing_bytes(draft: &PaymentDraft) -> Vec<u8> {
    let currency = draft.currency.as_str().as_bytes();
    let mut out = Vec::with_capacity(DOMAIN_TAG.len() + 16 + 8 + 2 + currency.len() + 8 + 8);
    out.extend_from_slice(DOMAIN_TAG);
    out.extend_from_slice(draft.id.as_bytes());
    out.extend_from_slice(&draft.amount.minor().to_be_bytes());
    out.extend_from_slice(&(currency.len() as u16).to_be_bytes());
    out.extend_from_slice(currency);
    out.extend_from_slice(&draft.timestamp.as_millis().to_be_bytes());
    out.extend_from_slice(&draft.counter.to_be_bytes());
    out
}
