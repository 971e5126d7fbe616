//! Wire messages for the two exchange kinds.

use nelo_payment::TransactionPayload;
use nelo_types::WalletId;
use nelo_verification::RejectReason;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the capability being selected, smartcard-application style.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationId(pub [u8; 6]);

/// The Nelo payment application.
pub const PAYMENT_APPLICATION: ApplicationId = ApplicationId([0xF0, 0x01, 0x02, 0x03, 0x04, 0x05]);

impl fmt::Debug for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApplicationId(")?;
        for b in self.0 {
            write!(f, "{b:02X}")?;
        }
        write!(f, ")")
    }
}

/// A self-describing contact card. Unsigned — the profile path carries no
/// financial risk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub full_name: String,
    pub title: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

/// Every frame that can cross the proximity channel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ExchangeMessage {
    /// Initiator → responder: select the payment capability.
    Select { application: ApplicationId },
    /// Initiator → responder: the signed payload plus its claimed sender.
    Payment {
        sender: WalletId,
        payload: TransactionPayload,
    },
    /// Responder → initiator: verifier accepted.
    Accept,
    /// Responder → initiator: verifier rejected, with the reason.
    Reject { reason: RejectReason },
    /// A contact card (profile exchange, fire-and-forget).
    Profile(ContactRecord),
}
