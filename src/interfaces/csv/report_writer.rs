use crate::domain::ports::LedgerRepository;
use crate::domain::transaction::TransactionStatus;
use crate::error::{Result, WalletError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Final state of one wallet: derived balance plus ledger counts per status.
#[derive(Debug, Serialize, PartialEq)]
pub struct ReportRow {
    pub wallet: String,
    pub balance: Decimal,
    pub new: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Builds the per-wallet report, sorted by wallet id for stable output.
pub async fn wallet_report(ledger: &dyn LedgerRepository) -> Result<Vec<ReportRow>> {
    let mut wallets = ledger
        .list_wallets()
        .await
        .map_err(|e| WalletError::get(e, "failed to list wallets"))?;
    wallets.sort_by(|a, b| a.id.cmp(&b.id));

    let mut rows = Vec::with_capacity(wallets.len());
    for wallet in wallets {
        let balance = ledger
            .get_balance(&wallet.id)
            .await
            .map_err(|e| WalletError::get(e, "failed to get wallet balance"))?;
        let transactions = ledger
            .transactions_for_wallet(&wallet.id)
            .await
            .map_err(|e| WalletError::get(e, "failed to list wallet transactions"))?;

        let count = |status: TransactionStatus| {
            transactions.iter().filter(|tx| tx.status == status).count()
        };
        rows.push(ReportRow {
            wallet: wallet.id,
            balance: balance.0.normalize(),
            new: count(TransactionStatus::New),
            successful: count(TransactionStatus::Successful),
            failed: count(TransactionStatus::Failed),
        });
    }
    Ok(rows)
}

/// Writes report rows as CSV.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(target: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(target),
        }
    }

    pub fn write_report(&mut self, rows: Vec<ReportRow>) -> Result<()> {
        for row in rows {
            self.writer
                .serialize(row)
                .map_err(|e| WalletError::internal(e, "failed to write report row"))?;
        }
        self.writer
            .flush()
            .map_err(|e| WalletError::internal(e, "failed to flush report"))?;
        Ok(())
    }
}
