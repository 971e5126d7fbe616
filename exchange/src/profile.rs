//! The profile exchange — one unsigned contact card frame.

use crate::channel::FrameChannel;
use crate::codec::{decode, encode};
use crate::message::{ContactRecord, ExchangeMessage};
use crate::ExchangeError;
use nelo_ledger::Ledger;
use nelo_store::{EntryId, EntryKind, EntryStatus, LedgerEntry, LedgerStore};
use nelo_types::{Timestamp, WalletId};
use std::time::Duration;

fn profile_entry(kind: EntryKind, name: &str) -> LedgerEntry {
    LedgerEntry {
        id: EntryId::random(),
        kind,
        status: EntryStatus::Success,
        amount: None,
        currency: None,
        timestamp: Timestamp::now(),
        metadata: Some(serde_json::json!({ "contact": name }).to_string()),
    }
}

/// Transmit a contact card and record the share.
pub async fn send_profile<C, LS>(
    channel: &mut C,
    record: &ContactRecord,
    ledger: &Ledger<LS>,
    wallet: &WalletId,
    timeout: Duration,
) -> Result<(), ExchangeError>
where
    C: FrameChannel,
    LS: LedgerStore,
{
    let frame = encode(&ExchangeMessage::Profile(record.clone()))?;
    tokio::time::timeout(timeout, channel.send(frame))
        .await
        .map_err(|_| ExchangeError::ChannelTimeout)??;
    tracing::info!(contact = %record.full_name, "profile shared");
    ledger.append(wallet, &profile_entry(EntryKind::ProfileShare, &record.full_name))?;
    Ok(())
}

/// Wait for a contact card, store the receive in the ledger, return it.
pub async fn receive_profile<C, LS>(
    channel: &mut C,
    ledger: &Ledger<LS>,
    wallet: &WalletId,
    timeout: Duration,
) -> Result<ContactRecord, ExchangeError>
where
    C: FrameChannel,
    LS: LedgerStore,
{
    let frame = tokio::time::timeout(timeout, channel.recv())
        .await
        .map_err(|_| ExchangeError::ChannelTimeout)??;
    let record = match decode(&frame)? {
        ExchangeMessage::Profile(record) => record,
        other => {
            return Err(ExchangeError::MalformedMessage(format!(
                "expected Profile, got {other:?}"
            )));
        }
    };
    ledger.append(wallet, &profile_entry(EntryKind::Receive, &record.full_name))?;
    Ok(record)
}

