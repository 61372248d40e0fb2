use crate::domain::account::LinkedAccount;
use crate::domain::ports::LedgerRepository;
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::domain::wallet::{Balance, Wallet};
use crate::error::StoreError;
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for wallet records.
pub const CF_WALLETS: &str = "wallets";
/// Column Family for linked funding accounts.
pub const CF_LINKED_ACCOUNTS: &str = "linked_accounts";
/// Column Family for the transaction ledger.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent ledger backed by RocksDB.
///
/// Each entity lives in its own Column Family, keyed by its string id and
/// stored as a serde_json value. Balance aggregation scans the transactions
/// CF inside the adapter, so callers always read a sum consistent with the
/// stored ledger.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbLedger {
    db: Arc<DB>,
}

impl RocksDbLedger {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = vec![
            ColumnFamilyDescriptor::new(CF_WALLETS, Options::default()),
            ColumnFamilyDescriptor::new(CF_LINKED_ACCOUNTS, Options::default()),
            ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, StoreError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Backend(format!("{name} column family not found")))
    }

    fn put<T: Serialize>(&self, cf_name: &str, key: &str, value: &T) -> Result<(), StoreError> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value)?;
        self.db.put_cf(cf, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, cf_name: &str, key: &str) -> Result<Option<T>, StoreError> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn scan<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>, StoreError> {
        let cf = self.cf(cf_name)?;
        let mut values = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            values.push(serde_json::from_slice(&value)?);
        }
        Ok(values)
    }
}

#[async_trait]
impl LedgerRepository for RocksDbLedger {
    async fn save_wallet(&self, wallet: Wallet) -> Result<(), StoreError> {
        self.put(CF_WALLETS, &wallet.id, &wallet)
    }

    async fn get_wallet(&self, wallet_id: &str) -> Result<Option<Wallet>, StoreError> {
        self.get(CF_WALLETS, wallet_id)
    }

    async fn save_linked_account(&self, account: LinkedAccount) -> Result<(), StoreError> {
        self.put(CF_LINKED_ACCOUNTS, &account.id, &account)
    }

    async fn get_linked_account(
        &self,
        account_id: &str,
    ) -> Result<Option<LinkedAccount>, StoreError> {
        self.get(CF_LINKED_ACCOUNTS, account_id)
    }

    async fn get_balance(&self, wallet_id: &str) -> Result<Balance, StoreError> {
        let balance = self
            .scan::<Transaction>(CF_TRANSACTIONS)?
            .into_iter()
            .filter(|tx| tx.wallet_id == wallet_id && tx.status == TransactionStatus::Successful)
            .fold(Balance::ZERO, |acc, tx| acc + tx.signed_amount());
        Ok(balance)
    }

    async fn save_transaction(&self, tx: Transaction) -> Result<(), StoreError> {
        let cf = self.cf(CF_TRANSACTIONS)?;
        // Insert-only: probe for the key without materializing the value.
        if self.db.get_pinned_cf(cf, tx.id.as_bytes())?.is_some() {
            return Err(StoreError::Duplicate(tx.id));
        }
        self.put(CF_TRANSACTIONS, &tx.id, &tx)
    }

    async fn get_transaction(&self, tx_id: &str) -> Result<Option<Transaction>, StoreError> {
        self.get(CF_TRANSACTIONS, tx_id)
    }

    async fn update_status(
        &self,
        tx_id: &str,
        status: TransactionStatus,
    ) -> Result<TransactionStatus, StoreError> {
        let mut tx: Transaction = self
            .get(CF_TRANSACTIONS, tx_id)?
            .ok_or_else(|| StoreError::NotFound(tx_id.to_string()))?;
        let prior = tx.status;
        tx.status = status;
        self.put(CF_TRANSACTIONS, tx_id, &tx)?;
        Ok(prior)
    }

    async fn list_wallets(&self) -> Result<Vec<Wallet>, StoreError> {
        self.scan(CF_WALLETS)
    }

    async fn transactions_for_wallet(
        &self,
        wallet_id: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .scan::<Transaction>(CF_TRANSACTIONS)?
            .into_iter()
            .filter(|tx| tx.wallet_id == wallet_id)
            .collect())
    }
}
