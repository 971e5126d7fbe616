//! The spend authorizer — one state machine per authorization attempt.
//!
//! Phases: `Idle → AmountValidated → CounterReserved → Signed → Exchanged
//! → Settled | Failed`. Amount checks run strictly before the counter is
//! consumed: a doomed attempt must never burn a counter value as a side
//! effect. Once reserved, a counter is never rolled back or reused —
//! freshness, not exhaustiveness, is the replay defense.

use crate::wallet::OfflineWallet;
use crate::WalletError;
use nelo_exchange::{send_payment, FrameChannel, PaymentOutcome};
use nelo_payment::{PaymentDraft, Signer, TransactionPayload, TxId};
use nelo_store::{
    CounterStore, EntryId, EntryKind, EntryStatus, LedgerEntry, LedgerStore, StoreError,
    WalletStore,
};
use nelo_types::{Amount, Timestamp};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AttemptPhase {
    Idle,
    AmountValidated,
    CounterReserved,
    Signed,
    Exchanged,
    Settled,
    Failed,
}

/// Tracks the phase of a single attempt, for tracing and transition
/// discipline.
struct SpendAttempt {
    phase: AttemptPhase,
}

impl SpendAttempt {
    fn start() -> Self {
        Self {
            phase: AttemptPhase::Idle,
        }
    }

    fn advance(&mut self, next: AttemptPhase) {
        debug_assert!(
            matches!(
                (self.phase, next),
                (AttemptPhase::Idle, AttemptPhase::AmountValidated)
                    | (AttemptPhase::AmountValidated, AttemptPhase::CounterReserved)
                    | (AttemptPhase::CounterReserved, AttemptPhase::Signed)
                    | (AttemptPhase::Signed, AttemptPhase::Exchanged)
                    | (AttemptPhase::Exchanged, AttemptPhase::Settled)
                    | (_, AttemptPhase::Failed)
            ),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        tracing::debug!(from = ?self.phase, to = ?next, "attempt transition");
        self.phase = next;
    }
}

/// Released on drop so a panicking or failing attempt never wedges the
/// wallet.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<W, C, L, S> OfflineWallet<W, C, L, S>
where
    W: WalletStore,
    C: CounterStore,
    L: LedgerStore,
    S: Signer,
{
    /// Authorize and settle one offline spend over the given channel.
    ///
    /// On success the offline balance is debited, a `Payment/Success` entry
    /// is appended, and the settled payload is returned. Every failure is
    /// recorded as `Payment/Failed` (financially inert — the balance is
    /// untouched). Re-invoking after any failure drafts a new payload with
    /// a fresh counter; there is no retry-with-same-counter.
    pub async fn authorize<Ch: FrameChannel>(
        &self,
        amount: Amount,
        channel: &mut Ch,
    ) -> Result<TransactionPayload, WalletError> {
        let _guard = self.begin_attempt()?;
        let mut attempt = SpendAttempt::start();

        // Amount validation, strictly before the counter is touched.
        if amount.is_zero() {
            attempt.advance(AttemptPhase::Failed);
            self.record_failed_payment(amount, None, "invalid amount");
            return Err(WalletError::InvalidAmount);
        }
        let available = self.wallets.get_wallet(&self.id)?.offline_balance;
        if amount > available {
            attempt.advance(AttemptPhase::Failed);
            self.record_failed_payment(amount, None, "insufficient offline balance");
            return Err(WalletError::InsufficientOfflineBalance {
                needed: amount,
                available,
            });
        }
        attempt.advance(AttemptPhase::AmountValidated);

        // Reserve a counter value. It is durable before we sign with it;
        // from here on this value is spent, whatever happens.
        let counter = match self.counters.next(&self.id) {
            Ok(counter) => counter,
            Err(e) => {
                attempt.advance(AttemptPhase::Failed);
                self.record_failed_payment(amount, None, "counter reservation failed");
                return Err(e.into());
            }
        };
        attempt.advance(AttemptPhase::CounterReserved);

        let draft = PaymentDraft {
            id: TxId::random(),
            amount,
            currency: self.params.currency,
            timestamp: Timestamp::now(),
            counter,
        };
        let payload = match self.signer.sign(&draft) {
            Ok(signature) => draft.into_payload(signature),
            Err(e) => {
                attempt.advance(AttemptPhase::Failed);
                self.record_failed_payment(amount, None, "signing failed");
                return Err(e.into());
            }
        };
        attempt.advance(AttemptPhase::Signed);

        let timeout = Duration::from_millis(self.params.exchange_timeout_ms);
        let outcome = match send_payment(channel, &self.id, &payload, timeout).await {
            Ok(outcome) => outcome,
            Err(e) => {
                attempt.advance(AttemptPhase::Failed);
                self.record_failed_payment(amount, Some(&payload), &e.to_string());
                return Err(e.into());
            }
        };
        attempt.advance(AttemptPhase::Exchanged);

        match outcome {
            PaymentOutcome::Rejected(reason) => {
                attempt.advance(AttemptPhase::Failed);
                self.record_failed_payment(amount, Some(&payload), &reason.to_string());
                Err(WalletError::PeerRejected(reason))
            }
            PaymentOutcome::Accepted => {
                self.settle(amount)?;
                self.ledger.append(
                    &self.id,
                    &LedgerEntry {
                        id: EntryId::random(),
                        kind: EntryKind::Payment,
                        status: EntryStatus::Success,
                        amount: Some(amount),
                        currency: Some(self.params.currency),
                        timestamp: Timestamp::now(),
                        metadata: Some(
                            serde_json::json!({ "tx": payload.id.to_string() }).to_string(),
                        ),
                    },
                )?;
                attempt.advance(AttemptPhase::Settled);
                tracing::info!(wallet = %self.id, tx = %payload.id, %amount, "spend settled");
                Ok(payload)
            }
        }
    }

    fn begin_attempt(&self) -> Result<InFlightGuard<'_>, WalletError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(WalletError::AuthorizationInProgress);
        }
        Ok(InFlightGuard(&self.in_flight))
    }

    /// Debit the offline balance for an accepted payment.
    fn settle(&self, amount: Amount) -> Result<(), WalletError> {
        let _guard = self.balance_lock.lock().expect("balance lock poisoned");
        let mut record = self.wallets.get_wallet(&self.id)?;
        record.offline_balance = record.offline_balance.checked_sub(amount).ok_or_else(|| {
            // Unreachable while the in-flight guard serializes spends and
            // transfers only grow the offline balance.
            WalletError::Storage(StoreError::Corruption(
                "offline balance below settled amount".into(),
            ))
        })?;
        self.wallets.put_wallet(&record)?;
        Ok(())
    }

    /// Best-effort failure bookkeeping. The attempt already failed; a
    /// ledger write failure here is logged, not propagated over the
    /// primary error.
    fn record_failed_payment(
        &self,
        amount: Amount,
        payload: Option<&TransactionPayload>,
        detail: &str,
    ) {
        let metadata = serde_json::json!({
            "tx": payload.map(|p| p.id.to_string()),
            "detail": detail,
        });
        let entry = LedgerEntry {
            id: EntryId::random(),
            kind: EntryKind::Payment,
            status: EntryStatus::Failed,
            amount: Some(amount),
            currency: Some(self.params.currency),
            timestamp: Timestamp::now(),
            metadata: Some(metadata.to_string()),
        };
        if let Err(e) = self.ledger.append(&self.id, &entry) {
            tracing::warn!(wallet = %self.id, error = %e, "failed to record failed attempt");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nelo_crypto::{derive_wallet_id, generate_device_keys};
    use nelo_nullables::{MemoryStore, NullChannel};
    use nelo_payment::DeviceSigner;
    use nelo_types::WalletParams;

    fn fast_params() -> WalletParams {
        WalletParams {
            exchange_timeout_ms: 50,
            ..WalletParams::standard()
        }
    }

    fn loaded_wallet(
        offline: u64,
    ) -> OfflineWallet<MemoryStore, MemoryStore, MemoryStore, DeviceSigner> {
        let keys = generate_device_keys();
        let id = derive_wallet_id(&keys.public);
        let wallet = OfflineWallet::provision(
            id,
            DeviceSigner::new(keys),
            fast_params(),
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

    #[tokio::test]
    async fn zero_amount_burns_no_counter() {
        let wallet = loaded_wallet(10_000);
        let (mut channel, _peer) = NullChannel::pair();
        let err = wallet.authorize(Amount::ZERO, &mut channel).await.unwrap_err();
        assert!(matches!(err, WalletError::InvalidAmount));
        assert_eq!(wallet.counter_position().unwrap(), 0);
    }

    #[tokio::test]
    async fn insufficient_balance_burns_no_counter_and_logs_failure() {
        let wallet = loaded_wallet(5_000);
        let (mut channel, _peer) = NullChannel::pair();
        let err = wallet
            .authorize(Amount::new(10_000), &mut channel)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::InsufficientOfflineBalance { .. }
        ));
        assert_eq!(wallet.counter_position().unwrap(), 0);
        assert_eq!(wallet.offline_balance().unwrap(), Amount::new(5_000));

        let history = wallet.history().unwrap();
        assert!(history
            .iter()
            .filter(|e| e.kind == EntryKind::Payment)
            .all(|e| e.status == EntryStatus::Failed));
    }

    #[tokio::test]
    async fn exchange_timeout_consumes_counter_without_debit() {
        let wallet = loaded_wallet(10_000);
        let (mut channel, _peer) = NullChannel::pair(); // nobody answers
        let err = wallet
            .authorize(Amount::new(1_000), &mut channel)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::Exchange(nelo_exchange::ExchangeError::ChannelTimeout)
        ));
        // The counter is spent and stays spent; the balance is untouched.
        assert_eq!(wallet.counter_position().unwrap(), 1);
        assert_eq!(wallet.offline_balance().unwrap(), Amount::new(10_000));
    }

    #[tokio::test]
    async fn each_attempt_draws_a_fresh_counter() {
        let wallet = loaded_wallet(10_000);
        for expected in 1..=3u64 {
            let (mut channel, _peer) = NullChannel::pair();
            let _ = wallet.authorize(Amount::new(1_000), &mut channel).await;
            assert_eq!(wallet.counter_position().unwrap(), expected);
        }
    }
}
