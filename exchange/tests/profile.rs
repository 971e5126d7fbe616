//! Profile exchange tests.
//!
//! These live as integration tests rather than unit tests because they
//! depend on `nelo-nullables`, which in turn depends on `nelo-exchange`.
//! Compiling them inside the crate (as unit tests) would link two copies
//! of `nelo-exchange`, so the `FrameChannel` the nullable implements would
//! not match the one the tests reference. As integration tests they link
//! the same library copy the nullables crate does.

use std::time::Duration;

use nelo_exchange::{receive_profile, send_profile, ContactRecord, ExchangeError};
use nelo_ledger::Ledger;
use nelo_nullables::{MemoryStore, NullChannel};
use nelo_store::{EntryKind, EntryStatus};
use nelo_types::WalletId;

const TIMEOUT: Duration = Duration::from_millis(200);

fn card() -> ContactRecord {
    ContactRecord {
        full_name: "Grace Hopper".into(),
        title: "Rear Admiral".into(),
        company: "US Navy".into(),
        email: "grace@example.mil".into(),
        phone: "+1 555".into(),
        website: "example.mil".into(),
    }
}

#[tokio::test]
async fn profile_share_roundtrip() {
    let (mut a, mut b) = NullChannel::pair();
    let sender_ledger = Ledger::new(MemoryStore::new(), 50);
    let receiver_ledger = Ledger::new(MemoryStore::new(), 50);
    let sender = WalletId::new("nelo_sender".to_string());
    let receiver = WalletId::new("nelo_receiver".to_string());

    let outgoing = card();
    let send = send_profile(&mut a, &outgoing, &sender_ledger, &sender, TIMEOUT);
    let recv = receive_profile(&mut b, &receiver_ledger, &receiver, TIMEOUT);
    let (sent, received) = tokio::join!(send, recv);

    sent.unwrap();
    assert_eq!(received.unwrap(), card());

    let out = sender_ledger.history(&sender).unwrap();
    assert_eq!(out[0].kind, EntryKind::ProfileShare);
    let inn = receiver_ledger.history(&receiver).unwrap();
    assert_eq!(inn[0].kind, EntryKind::Receive);
    assert_eq!(inn[0].status, EntryStatus::Success);
}

#[tokio::test]
async fn receive_times_out_when_nothing_arrives() {
    let (_a, mut b) = NullChannel::pair();
    let ledger = Ledger::new(MemoryStore::new(), 50);
    let wallet = WalletId::new("nelo_receiver".to_string());
    let err = receive_profile(&mut b, &ledger, &wallet, Duration::from_millis(50))
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::ChannelTimeout));
}
