use crate::domain::account::LinkedAccount;
use crate::domain::ports::LedgerRepository;
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::domain::wallet::{Balance, Wallet};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger.
///
/// Uses `Arc<RwLock<HashMap>>` maps per entity to allow shared concurrent
/// access; `Clone` shares the underlying state. Ideal for tests and for
/// batch runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    wallets: Arc<RwLock<HashMap<String, Wallet>>>,
    accounts: Arc<RwLock<HashMap<String, LinkedAccount>>>,
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
}

impl InMemoryLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedger {
    async fn save_wallet(&self, wallet: Wallet) -> Result<(), StoreError> {
        let mut wallets = self.wallets.write().await;
        wallets.insert(wallet.id.clone(), wallet);
        Ok(())
    }

    async fn get_wallet(&self, wallet_id: &str) -> Result<Option<Wallet>, StoreError> {
        let wallets = self.wallets.read().await;
        Ok(wallets.get(wallet_id).cloned())
    }

    async fn save_linked_account(&self, account: LinkedAccount) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id.clone(), account);
        Ok(())
    }

    async fn get_linked_account(
        &self,
        account_id: &str,
    ) -> Result<Option<LinkedAccount>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(account_id).cloned())
    }

    async fn get_balance(&self, wallet_id: &str) -> Result<Balance, StoreError> {
        let transactions = self.transactions.read().await;
        let balance = transactions
            .values()
            .filter(|tx| tx.wallet_id == wallet_id && tx.status == TransactionStatus::Successful)
            .fold(Balance::ZERO, |acc, tx| acc + tx.signed_amount());
        Ok(balance)
    }

    async fn save_transaction(&self, tx: Transaction) -> Result<(), StoreError> {
        let mut transactions = self.transactions.write().await;
        if transactions.contains_key(&tx.id) {
            return Err(StoreError::Duplicate(tx.id));
        }
        transactions.insert(tx.id.clone(), tx);
        Ok(())
    }

    async fn get_transaction(&self, tx_id: &str) -> Result<Option<Transaction>, StoreError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(tx_id).cloned())
    }

    async fn update_status(
        &self,
        tx_id: &str,
        status: TransactionStatus,
    ) -> Result<TransactionStatus, StoreError> {
        let mut transactions = self.transactions.write().await;
        let tx = transactions
            .get_mut(tx_id)
            .ok_or_else(|| StoreError::NotFound(tx_id.to_string()))?;
        let prior = tx.status;
        tx.status = status;
        Ok(prior)
    }

    async fn list_wallets(&self) -> Result<Vec<Wallet>, StoreError> {
        let wallets = self.wallets.read().await;
        Ok(wallets.values().cloned().collect())
    }

    async fn transactions_for_wallet(
        &self,
        wallet_id: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .values()
            .filter(|tx| tx.wallet_id == wallet_id)
            .cloned()
            .collect())
    }
}
