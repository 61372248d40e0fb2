use async_trait::async_trait;
use ledgerpay::domain::account::LinkedAccount;
use ledgerpay::domain::ports::{LedgerRepository, Notifier, PaymentProvider};
use ledgerpay::domain::transaction::{Transaction, TransactionStatus};
use ledgerpay::domain::wallet::{Amount, Balance, Wallet};
use ledgerpay::error::{ProviderError, StoreError};
use ledgerpay::infrastructure::in_memory::InMemoryLedger;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

pub const WALLET: &str = "w1";
pub const LINKED_ACCOUNT: &str = "a1";
pub const UNLINKED_ACCOUNT: &str = "a2";

/// An in-memory ledger pre-seeded with one wallet, one linked funding
/// account, and one account that was registered but never linked.
pub async fn seeded_ledger() -> Arc<InMemoryLedger> {
    let ledger = Arc::new(InMemoryLedger::new());
    ledger
        .save_wallet(Wallet::new(WALLET, "u1", "main").unwrap())
        .await
        .unwrap();
    ledger
        .save_linked_account(LinkedAccount::new(LINKED_ACCOUNT, "u1", "ACME Bank").linked())
        .await
        .unwrap();
    ledger
        .save_linked_account(LinkedAccount::new(UNLINKED_ACCOUNT, "u1", "Other Bank"))
        .await
        .unwrap();
    ledger
}

/// A payment provider double with a switchable outcome and a call counter.
pub struct ScriptedProvider {
    decline: AtomicBool,
    pub calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn settling() -> Self {
        Self {
            decline: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn declining() -> Self {
        Self {
            decline: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_decline(&self, decline: bool) {
        self.decline.store(decline, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn outcome(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.decline.load(Ordering::SeqCst) {
            Err(ProviderError::Rejected("declined by test".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PaymentProvider for ScriptedProvider {
    async fn settle_deposit(
        &self,
        _amount: Amount,
        _currency: &str,
        _note: &str,
    ) -> Result<(), ProviderError> {
        self.outcome()
    }

    async fn settle_withdrawal(
        &self,
        _amount: Amount,
        _currency: &str,
        _note: &str,
    ) -> Result<(), ProviderError> {
        self.outcome()
    }
}

/// A notifier double that records every message it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str) {
        self.messages.lock().await.push(message.to_string());
    }
}

/// Wraps an `InMemoryLedger` and fails `update_status` on demand, to
/// exercise the path where the provider has moved money but the status
/// write does not land.
pub struct FlakyLedger {
    inner: InMemoryLedger,
    fail_update: AtomicBool,
}

impl FlakyLedger {
    pub fn new(inner: InMemoryLedger) -> Self {
        Self {
            inner,
            fail_update: AtomicBool::new(false),
        }
    }

    pub fn fail_next_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl LedgerRepository for FlakyLedger {
    async fn save_wallet(&self, wallet: Wallet) -> Result<(), StoreError> {
        self.inner.save_wallet(wallet).await
    }

    async fn get_wallet(&self, wallet_id: &str) -> Result<Option<Wallet>, StoreError> {
        self.inner.get_wallet(wallet_id).await
    }

    async fn save_linked_account(&self, account: LinkedAccount) -> Result<(), StoreError> {
        self.inner.save_linked_account(account).await
    }

    async fn get_linked_account(
        &self,
        account_id: &str,
    ) -> Result<Option<LinkedAccount>, StoreError> {
        self.inner.get_linked_account(account_id).await
    }

    async fn get_balance(&self, wallet_id: &str) -> Result<Balance, StoreError> {
        self.inner.get_balance(wallet_id).await
    }

    async fn save_transaction(&self, tx: Transaction) -> Result<(), StoreError> {
        self.inner.save_transaction(tx).await
    }

    async fn get_transaction(&self, tx_id: &str) -> Result<Option<Transaction>, StoreError> {
        self.inner.get_transaction(tx_id).await
    }

    async fn update_status(
        &self,
        tx_id: &str,
        status: TransactionStatus,
    ) -> Result<TransactionStatus, StoreError> {
        if self.fail_update.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("update write lost".to_string()));
        }
        self.inner.update_status(tx_id, status).await
    }

    async fn list_wallets(&self) -> Result<Vec<Wallet>, StoreError> {
        self.inner.list_wallets().await
    }

    async fn transactions_for_wallet(
        &self,
        wallet_id: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.inner.transactions_for_wallet(wallet_id).await
    }
}
