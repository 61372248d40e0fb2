use super::account::LinkedAccount;
use super::transaction::{Transaction, TransactionStatus};
use super::wallet::{Amount, Balance, Wallet};
use crate::error::{ProviderError, StoreError};
use async_trait::async_trait;
use std::sync::Arc;

/// Persistence boundary for wallets, linked accounts, and the transaction
/// ledger.
///
/// Implementations are dumb storage: no business rules. The only structural
/// requirements are that `save_transaction` is insert-only (a duplicate id
/// fails with `StoreError::Duplicate`) and that `get_balance` aggregates
/// inside the adapter so concurrent readers see a consistent sum.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn save_wallet(&self, wallet: Wallet) -> Result<(), StoreError>;

    /// `None` signals "not found", never an error.
    async fn get_wallet(&self, wallet_id: &str) -> Result<Option<Wallet>, StoreError>;

    async fn save_linked_account(&self, account: LinkedAccount) -> Result<(), StoreError>;

    /// Same not-found convention as `get_wallet`.
    async fn get_linked_account(
        &self,
        account_id: &str,
    ) -> Result<Option<LinkedAccount>, StoreError>;

    /// Signed sum of `amount` over the wallet's SUCCESSFUL transactions;
    /// zero if none exist.
    async fn get_balance(&self, wallet_id: &str) -> Result<Balance, StoreError>;

    /// Insert-only. Fails with `StoreError::Duplicate` if the id exists.
    async fn save_transaction(&self, tx: Transaction) -> Result<(), StoreError>;

    async fn get_transaction(&self, tx_id: &str) -> Result<Option<Transaction>, StoreError>;

    /// Writes the status field and returns the status the row held before the
    /// write, so callers can detect repeated settlement attempts.
    /// `StoreError::NotFound` if the transaction does not exist.
    async fn update_status(
        &self,
        tx_id: &str,
        status: TransactionStatus,
    ) -> Result<TransactionStatus, StoreError>;

    async fn list_wallets(&self) -> Result<Vec<Wallet>, StoreError>;

    async fn transactions_for_wallet(
        &self,
        wallet_id: &str,
    ) -> Result<Vec<Transaction>, StoreError>;
}

/// The external settlement rail that actually moves money.
///
/// Calls are not idempotent: invoking one twice for the same logical
/// transaction is a real-world double payment.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn settle_deposit(
        &self,
        amount: Amount,
        currency: &str,
        note: &str,
    ) -> Result<(), ProviderError>;

    async fn settle_withdrawal(
        &self,
        amount: Amount,
        currency: &str,
        note: &str,
    ) -> Result<(), ProviderError>;
}

/// Best-effort side-channel notification sink. Failures are invisible by
/// construction.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str);
}

pub type LedgerRef = Arc<dyn LedgerRepository>;
pub type ProviderRef = Arc<dyn PaymentProvider>;
pub type NotifierRef = Arc<dyn Notifier>;
