//! Transaction payload types.

use nelo_types::{Amount, CurrencyCode, Signature, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 16-byte random transaction identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId([u8; 16]);

impl TxId {
    /// Generate a fresh random id.
    pub fn random() -> Self {
        Self(rand::random())
    }

    pub fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", &hex::encode(self.0)[..8])
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// The unsigned fields of a spend, in the order the canonical encoding
/// serializes them.
///
/// Drafted by the authorizer after the amount check passes and the counter
/// is reserved; consumed by a [`Signer`](crate::Signer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentDraft {
    pub id: TxId,
    pub amount: Amount,
    pub currency: CurrencyCode,
    pub timestamp: Timestamp,
    /// The value drawn from the wallet's monotonic counter at signing time.
    pub counter: u64,
}

impl PaymentDraft {
    /// Attach a signature, producing the immutable signed payload.
    pub fn into_payload(self, signature: Signature) -> TransactionPayload {
        TransactionPayload {
            id: self.id,
            amount: self.amount,
            currency: self.currency,
            timestamp: self.timestamp,
            counter: self.counter,
            signature,
        }
    }
}

/// A signed offline payment, immutable once created.
///
/// Consumed exactly once by the counterpart's verifier; a retry after any
/// failure drafts a brand-new payload with a fresh counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub id: TxId,
    pub amount: Amount,
    pub currency: CurrencyCode,
    pub timestamp: Timestamp,
    pub counter: u64,
    /// Signature over the canonical encoding of all other fields.
    pub signature: Signature,
}

impl TransactionPayload {
    /// The unsigned view of this payload, for signature recomputation.
    pub fn draft(&self) -> PaymentDraft {
        PaymentDraft {
            id: self.id,
            amount: self.amount,
            currency: self.currency,
            timestamp: self.timestamp,
            counter: self.counter,
        }
    }
}
