//! End-to-end offline spend scenarios: payer wallet against a merchant
//! reader over an in-process channel.

use nelo_crypto::{derive_wallet_id, device_keys_from_seed, generate_device_keys};
use nelo_exchange::receive_payment;
use nelo_ledger::Ledger;
use nelo_nullables::{MemoryStore, NullChannel};
use nelo_payment::DeviceSigner;
use nelo_store::{EntryKind, EntryStatus};
use nelo_types::{Amount, WalletId, WalletParams};
use nelo_verification::{RejectReason, Verdict, Verifier};
use nelo_wallet_core::{OfflineWallet, WalletError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_millis(500);

type TestWallet = OfflineWallet<MemoryStore, MemoryStore, MemoryStore, DeviceSigner>;

fn wallet_with_offline(offline: u64) -> TestWallet {
    let keys = generate_device_keys();
    let id = derive_wallet_id(&keys.public);
    let params = WalletParams {
        exchange_timeout_ms: 500,
        ..WalletParams::standard()
    };
    let wallet = OfflineWallet::provision(
        id,
        DeviceSigner::new(keys),
        params,
        MemoryStore::new(),
        MemoryStore::new(),
        MemoryStore::new(),
    )
    .unwrap();
    if offline > 0 {
        wallet.recharge(Amount::new(offline)).unwrap();
        wallet
            .transfer_online_to_offline(Amount::new(offline))
            .unwrap();
    }
    wallet
}

fn merchant_id() -> WalletId {
    derive_wallet_id(&device_keys_from_seed(&[0xEE; 32]).public)
}

/// Scenario A: a fully successful tap.
#[tokio::test]
async fn successful_spend_settles_and_logs() {
    let wallet = wallet_with_offline(50_000);
    let verifier = Verifier::new(MemoryStore::new());
    let merchant_ledger = Ledger::new(MemoryStore::new(), 50);
    let merchant = merchant_id();

    let (mut payer_ch, mut reader_ch) = NullChannel::pair();
    let (payload, received) = tokio::join!(
        wallet.authorize(Amount::new(10_000), &mut payer_ch),
        receive_payment(&mut reader_ch, &verifier, &merchant_ledger, &merchant, TIMEOUT),
    );

    let payload = payload.unwrap();
    assert_eq!(payload.counter, 1);
    assert_eq!(payload.amount, Amount::new(10_000));
    assert_eq!(received.unwrap().verdict, Verdict::Accept);

    assert_eq!(wallet.offline_balance().unwrap(), Amount::new(40_000));
    let payments: Vec<_> = wallet
        .history()
        .unwrap()
        .into_iter()
        .filter(|e| e.kind == EntryKind::Payment)
        .collect();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].status, EntryStatus::Success);
    assert_eq!(payments[0].amount, Some(Amount::new(10_000)));
}

/// Scenario B: a second authorize while the first is in flight fails fast.
#[tokio::test]
async fn concurrent_spend_fails_fast() {
    let wallet = wallet_with_offline(50_000);
    let verifier = Verifier::new(MemoryStore::new());
    let merchant_ledger = Ledger::new(MemoryStore::new(), 50);
    let merchant = merchant_id();

    let (mut payer_ch, mut reader_ch) = NullChannel::pair();
    let (mut second_ch, _unused) = NullChannel::pair();

    // join! polls in order: the first authorize reserves the in-flight
    // slot before its first await; the second call then fails fast; the
    // responder finally answers so the first can settle.
    let (first, second, _received) = tokio::join!(
        wallet.authorize(Amount::new(10_000), &mut payer_ch),
        wallet.authorize(Amount::new(10_000), &mut second_ch),
        receive_payment(&mut reader_ch, &verifier, &merchant_ledger, &merchant, TIMEOUT),
    );

    first.unwrap();
    assert!(matches!(second, Err(WalletError::AuthorizationInProgress)));
    // Only the first attempt moved money.
    assert_eq!(wallet.offline_balance().unwrap(), Amount::new(40_000));
    assert_eq!(wallet.counter_position().unwrap(), 1);
}

/// Scenario C: replaying an accepted payload is rejected without
/// advancing verifier state.
#[tokio::test]
async fn replay_is_rejected() {
    let wallet = wallet_with_offline(50_000);
    let verifier = Verifier::new(MemoryStore::new());
    let merchant_ledger = Ledger::new(MemoryStore::new(), 50);
    let merchant = merchant_id();

    let (mut payer_ch, mut reader_ch) = NullChannel::pair();
    let (payload, _) = tokio::join!(
        wallet.authorize(Amount::new(10_000), &mut payer_ch),
        receive_payment(&mut reader_ch, &verifier, &merchant_ledger, &merchant, TIMEOUT),
    );
    let payload = payload.unwrap();

    // Resubmit the exact same payload straight to the verifier.
    assert_eq!(
        verifier.verify(&payload, wallet.id()).unwrap(),
        Verdict::Reject(RejectReason::ReplayOrStale)
    );
    // Payer state untouched by the replay attempt.
    assert_eq!(wallet.offline_balance().unwrap(), Amount::new(40_000));

    // The rejection did not advance last-accepted: the next genuine spend
    // (counter 2) still verifies.
    let (mut payer_ch, mut reader_ch) = NullChannel::pair();
    let (next, _) = tokio::join!(
        wallet.authorize(Amount::new(1_000), &mut payer_ch),
        receive_payment(&mut reader_ch, &verifier, &merchant_ledger, &merchant, TIMEOUT),
    );
    assert_eq!(next.unwrap().counter, 2);
}

/// Scenario D: insufficient balance consumes no counter and never logs a
/// successful payment.
#[tokio::test]
async fn insufficient_balance_is_inert() {
    let wallet = wallet_with_offline(5_000);
    let (mut channel, _peer) = NullChannel::pair();

    let err = wallet
        .authorize(Amount::new(10_000), &mut channel)
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InsufficientOfflineBalance { .. }));
    assert_eq!(wallet.counter_position().unwrap(), 0);
    assert_eq!(wallet.offline_balance().unwrap(), Amount::new(5_000));
    assert!(!wallet
        .history()
        .unwrap()
        .iter()
        .any(|e| e.kind == EntryKind::Payment && e.status == EntryStatus::Success));
}

/// Scenario E: a transfer that would breach the ceiling mutates nothing.
#[tokio::test]
async fn ceiling_breach_rejected_before_mutation() {
    let wallet = wallet_with_offline(45_000);
    wallet.recharge(Amount::new(20_000)).unwrap();

    let err = wallet
        .transfer_online_to_offline(Amount::new(10_000))
        .unwrap_err();
    assert!(matches!(err, WalletError::OfflineCeilingExceeded { .. }));
    assert_eq!(wallet.offline_balance().unwrap(), Amount::new(45_000));
    assert_eq!(wallet.online_balance().unwrap(), Amount::new(20_000));
}

/// Counters across successful spends are strictly increasing.
#[tokio::test]
async fn counters_strictly_increase_across_spends() {
    let wallet = wallet_with_offline(50_000);
    let verifier = Verifier::new(MemoryStore::new());
    let merchant_ledger = Ledger::new(MemoryStore::new(), 50);
    let merchant = merchant_id();

    let mut last = 0;
    for _ in 0..5 {
        let (mut payer_ch, mut reader_ch) = NullChannel::pair();
        let (payload, _) = tokio::join!(
            wallet.authorize(Amount::new(1_000), &mut payer_ch),
            receive_payment(&mut reader_ch, &verifier, &merchant_ledger, &merchant, TIMEOUT),
        );
        let counter = payload.unwrap().counter;
        assert!(counter > last);
        last = counter;
    }
}

/// The append observer fires for settled payments — the UI refresh hook.
#[tokio::test]
async fn ledger_observer_sees_settlement() {
    let wallet = wallet_with_offline(50_000);
    let verifier = Verifier::new(MemoryStore::new());
    let merchant_ledger = Ledger::new(MemoryStore::new(), 50);
    let merchant = merchant_id();

    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    wallet.ledger().on_append(move |_, entry| {
        if entry.kind == EntryKind::Payment {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    let (mut payer_ch, mut reader_ch) = NullChannel::pair();
    let (payload, _) = tokio::join!(
        wallet.authorize(Amount::new(2_000), &mut payer_ch),
        receive_payment(&mut reader_ch, &verifier, &merchant_ledger, &merchant, TIMEOUT),
    );
    payload.unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}
