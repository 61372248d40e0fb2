use crate::domain::ports::{LedgerRef, NotifierRef, ProviderRef};
use crate::domain::transaction::{Transaction, TransactionKind, TransactionStatus};
use crate::domain::wallet::Amount;
use crate::error::{Result, WalletError};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// The monetary transaction orchestrator.
///
/// Owns the lifecycle of every transaction: `deposit`/`withdraw` validate a
/// request and persist a pending (`NEW`) record, and `pay_transaction` drives
/// that record through settlement against the external payment provider.
/// Balance is always derived from the ledger, never cached here, so the
/// wallet and the ledger cannot diverge on a partial failure: until a
/// transaction is SUCCESSFUL it simply does not count.
///
/// The notifier list and the account-linking policy are fixed at
/// construction.
pub struct TransactionOrchestrator {
    ledger: LedgerRef,
    provider: ProviderRef,
    notifiers: Vec<NotifierRef>,
    require_linked: bool,
}

impl TransactionOrchestrator {
    pub fn new(ledger: LedgerRef, provider: ProviderRef) -> Self {
        Self {
            ledger,
            provider,
            notifiers: Vec::new(),
            require_linked: false,
        }
    }

    /// Registers a best-effort notification sink.
    pub fn with_notifier(mut self, notifier: NotifierRef) -> Self {
        self.notifiers.push(notifier);
        self
    }

    /// Rejects movements against funding accounts that exist but have not
    /// been verified as linked.
    pub fn require_linked_accounts(mut self) -> Self {
        self.require_linked = true;
        self
    }

    /// Accepts a deposit request and records it as a pending transaction.
    ///
    /// No money moves here; settlement happens in a separate
    /// [`pay_transaction`](Self::pay_transaction) call.
    pub async fn deposit(
        &self,
        wallet_id: &str,
        account_id: &str,
        amount: Decimal,
        currency: &str,
        note: &str,
    ) -> Result<Transaction> {
        self.accept(TransactionKind::In, wallet_id, account_id, amount, currency, note)
            .await
    }

    /// Accepts a withdrawal request and records it as a pending transaction.
    ///
    /// The derived balance must cover the amount at acceptance time. The
    /// check is advisory: the new transaction is still `NEW` and does not
    /// count against the balance other concurrent requests observe.
    pub async fn withdraw(
        &self,
        wallet_id: &str,
        account_id: &str,
        amount: Decimal,
        currency: &str,
        note: &str,
    ) -> Result<Transaction> {
        self.accept(TransactionKind::Out, wallet_id, account_id, amount, currency, note)
            .await
    }

    async fn accept(
        &self,
        kind: TransactionKind,
        wallet_id: &str,
        account_id: &str,
        amount: Decimal,
        currency: &str,
        note: &str,
    ) -> Result<Transaction> {
        let account = self
            .ledger
            .get_linked_account(account_id)
            .await
            .map_err(|e| WalletError::get(e, "failed to get linked account by id"))?
            .ok_or_else(|| WalletError::invalid_params("account not found"))?;

        if self.require_linked && !account.is_linked {
            return Err(WalletError::invalid_params("account not linked"));
        }

        self.ledger
            .get_wallet(wallet_id)
            .await
            .map_err(|e| WalletError::get(e, "failed to get wallet by id"))?
            .ok_or_else(|| WalletError::invalid_params("wallet not found"))?;

        let amount = Amount::new(amount)?;

        if kind == TransactionKind::Out {
            let balance = self
                .ledger
                .get_balance(wallet_id)
                .await
                .map_err(|e| WalletError::get(e, "failed to get wallet balance"))?;
            if !balance.covers(amount) {
                return Err(WalletError::invalid_params("insufficient balance"));
            }
        }

        let tx = Transaction::new(
            Uuid::new_v4().to_string(),
            wallet_id,
            account_id,
            amount,
            currency,
            kind,
            note,
        );

        let context = match kind {
            TransactionKind::In => "failed to create deposit transaction",
            TransactionKind::Out => "failed to create withdrawal transaction",
        };
        self.ledger
            .save_transaction(tx.clone())
            .await
            .map_err(|e| WalletError::create(e, context))?;

        Ok(tx)
    }

    /// Settles a pending transaction against the payment provider.
    ///
    /// The provider outcome is recorded, not raised: a declined movement
    /// turns the transaction FAILED and the call still returns `Ok`. Only a
    /// missing/already-settled transaction (`InvalidParams`) or a failing
    /// status write (`Update`) surface as errors. After a failed status
    /// write the row is still `NEW`, so retrying this call is safe: the
    /// status guard keeps holding until the write lands.
    pub async fn pay_transaction(&self, tx_id: &str) -> Result<()> {
        let mut tx = self
            .ledger
            .get_transaction(tx_id)
            .await
            .map_err(|e| WalletError::get(e, "failed to get transaction by id"))?
            .ok_or_else(|| WalletError::invalid_params("transaction not found"))?;

        if tx.status != TransactionStatus::New {
            return Err(WalletError::invalid_params("transaction status is not new"));
        }

        let ledger = Arc::clone(&self.ledger);
        let provider = Arc::clone(&self.provider);
        let notifiers = self.notifiers.clone();

        // Once the provider has been asked to move money, the status write
        // must happen even if the caller goes away mid-call; settlement
        // therefore runs on its own task and the caller merely awaits it.
        let settlement = tokio::spawn(async move {
            let outcome = match tx.kind {
                TransactionKind::In => {
                    provider
                        .settle_deposit(tx.amount, &tx.currency, &tx.note)
                        .await
                }
                TransactionKind::Out => {
                    provider
                        .settle_withdrawal(tx.amount, &tx.currency, &tx.note)
                        .await
                }
            };

            match outcome {
                Ok(()) => tx.to_successful()?,
                Err(err) => {
                    let err = WalletError::third_party(err, "failed to call payment provider");
                    tracing::warn!(tx_id = %tx.id, error = %err, "settlement attempt failed");
                    tx.to_failed()?;
                }
            }

            ledger
                .update_status(&tx.id, tx.status)
                .await
                .map_err(|e| WalletError::update(e, "failed to update transaction status"))?;

            let message = format!("transaction {} settled with status {}", tx.id, tx.status);
            for notifier in &notifiers {
                notifier.notify(&message).await;
            }

            Ok(())
        });

        settlement
            .await
            .map_err(|e| WalletError::internal(e, "settlement task aborted"))?
    }
}
