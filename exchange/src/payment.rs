//! The secure payment exchange.
//!
//! Initiator: `Select`, then `Payment`, then wait for the responder's
//! verdict. Responder: expect exactly that sequence, run the verifier,
//! answer `Accept` or `Reject`. One attempt per tap; any failure ends the
//! exchange and the caller starts over with a fresh payload.

use crate::channel::FrameChannel;
use crate::codec::{decode, encode};
use crate::message::{ExchangeMessage, PAYMENT_APPLICATION};
use crate::ExchangeError;
use nelo_ledger::Ledger;
use nelo_payment::TransactionPayload;
use nelo_store::{EntryId, EntryKind, EntryStatus, LedgerEntry, LedgerStore, VerifierStore};
use nelo_types::{Timestamp, WalletId};
use nelo_verification::{RejectReason, Verdict, Verifier};
use std::time::Duration;

/// The initiator-side result of a completed exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentOutcome {
    Accepted,
    Rejected(RejectReason),
}

/// What the responder observed and decided.
#[derive(Debug)]
pub struct ReceivedPayment {
    pub sender: WalletId,
    pub payload: TransactionPayload,
    pub verdict: Verdict,
}

async fn send_frame<C: FrameChannel>(
    channel: &mut C,
    frame: Vec<u8>,
    timeout: Duration,
) -> Result<(), ExchangeError> {
    tokio::time::timeout(timeout, channel.send(frame))
        .await
        .map_err(|_| ExchangeError::ChannelTimeout)??;
    Ok(())
}

async fn recv_frame<C: FrameChannel>(
    channel: &mut C,
    timeout: Duration,
) -> Result<Vec<u8>, ExchangeError> {
    let frame = tokio::time::timeout(timeout, channel.recv())
        .await
        .map_err(|_| ExchangeError::ChannelTimeout)??;
    Ok(frame)
}

/// Drive the initiator side of a payment tap.
pub async fn send_payment<C: FrameChannel>(
    channel: &mut C,
    sender: &WalletId,
    payload: &TransactionPayload,
    timeout: Duration,
) -> Result<PaymentOutcome, ExchangeError> {
    tracing::debug!(tx = %payload.id, "selecting payment application");
    let select = encode(&ExchangeMessage::Select {
        application: PAYMENT_APPLICATION,
    })?;
    send_frame(channel, select, timeout).await?;

    let frame = encode(&ExchangeMessage::Payment {
        sender: sender.clone(),
        payload: payload.clone(),
    })?;
    send_frame(channel, frame, timeout).await?;

    match decode(&recv_frame(channel, timeout).await?)? {
        ExchangeMessage::Accept => {
            tracing::info!(tx = %payload.id, "payment accepted by peer");
            Ok(PaymentOutcome::Accepted)
        }
        ExchangeMessage::Reject { reason } => {
            tracing::warn!(tx = %payload.id, %reason, "payment rejected by peer");
            Ok(PaymentOutcome::Rejected(reason))
        }
        other => Err(ExchangeError::MalformedMessage(format!(
            "expected verdict, got {other:?}"
        ))),
    }
}

/// Drive the responder (merchant/reader) side of a payment tap.
///
/// Runs the verifier on the received payload, answers the initiator, and
/// records a `Receive` ledger entry for the merchant's own audit trail.
/// The verifier's counter state is durable before the answer is sent.
pub async fn receive_payment<C, VS, LS>(
    channel: &mut C,
    verifier: &Verifier<VS>,
    ledger: &Ledger<LS>,
    merchant: &WalletId,
    timeout: Duration,
) -> Result<ReceivedPayment, ExchangeError>
where
    C: FrameChannel,
    VS: VerifierStore,
    LS: LedgerStore,
{
    match decode(&recv_frame(channel, timeout).await?)? {
        ExchangeMessage::Select { application } if application == PAYMENT_APPLICATION => {}
        ExchangeMessage::Select { application } => {
            return Err(ExchangeError::MalformedMessage(format!(
                "unknown application {application:?}"
            )));
        }
        other => {
            return Err(ExchangeError::MalformedMessage(format!(
                "expected Select, got {other:?}"
            )));
        }
    }

    let (sender, payload) = match decode(&recv_frame(channel, timeout).await?)? {
        ExchangeMessage::Payment { sender, payload } => (sender, payload),
        other => {
            return Err(ExchangeError::MalformedMessage(format!(
                "expected Payment, got {other:?}"
            )));
        }
    };

    let verdict = verifier.verify(&payload, &sender)?;

    let (status, reason) = match verdict {
        Verdict::Accept => (EntryStatus::Success, None),
        Verdict::Reject(reason) => (EntryStatus::Failed, Some(reason)),
    };
    let metadata = serde_json::json!({
        "tx": payload.id.to_string(),
        "from": sender.as_str(),
        "reason": reason.map(|r| r.to_string()),
    });
    ledger.append(
        merchant,
        &LedgerEntry {
            id: EntryId::random(),
            kind: EntryKind::Receive,
            status,
            amount: Some(payload.amount),
            currency: Some(payload.currency),
            timestamp: Timestamp::now(),
            metadata: Some(metadata.to_string()),
        },
    )?;

    let answer = match verdict {
        Verdict::Accept => ExchangeMessage::Accept,
        Verdict::Reject(reason) => ExchangeMessage::Reject { reason },
    };
    let frame = encode(&answer)?;
    send_frame(channel, frame, timeout).await?;

    Ok(ReceivedPayment {
        sender,
        payload,
        verdict,
    })
}

