use clap::Parser;
use ledgerpay::application::orchestrator::TransactionOrchestrator;
use ledgerpay::domain::account::LinkedAccount;
use ledgerpay::domain::ports::{LedgerRef, LedgerRepository, ProviderRef};
use ledgerpay::domain::transaction::TransactionStatus;
use ledgerpay::domain::wallet::Wallet;
use ledgerpay::error::WalletError;
use ledgerpay::infrastructure::in_memory::InMemoryLedger;
use ledgerpay::infrastructure::notification::EmailNotifier;
use ledgerpay::infrastructure::paymentsvc::PspClient;
use ledgerpay::interfaces::csv::operation_reader::{
    OperationReader, OperationRecord, OperationType,
};
use ledgerpay::interfaces::csv::report_writer::{ReportWriter, wallet_report};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Reject movements against funding accounts that are not linked.
    #[arg(long)]
    require_linked: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let ledger = build_ledger(&cli)?;
    let provider: ProviderRef = Arc::new(PspClient::new());

    let mut orchestrator = TransactionOrchestrator::new(Arc::clone(&ledger), provider)
        .with_notifier(Arc::new(EmailNotifier::new()));
    if cli.require_linked {
        orchestrator = orchestrator.require_linked_accounts();
    }

    // Process operations
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for record in reader.operations() {
        match record {
            Ok(record) => {
                if let Err(e) = apply_operation(&orchestrator, &ledger, record).await {
                    eprintln!("Error processing operation: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading operation: {}", e);
            }
        }
    }

    // Output final wallet states
    let rows = wallet_report(ledger.as_ref()).await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_report(rows).into_diagnostic()?;

    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
fn build_ledger(cli: &Cli) -> Result<LedgerRef> {
    use ledgerpay::infrastructure::rocksdb::RocksDbLedger;

    if let Some(db_path) = &cli.db_path {
        let store = RocksDbLedger::open(db_path).into_diagnostic()?;
        return Ok(Arc::new(store));
    }
    Ok(Arc::new(InMemoryLedger::new()))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn build_ledger(_cli: &Cli) -> Result<LedgerRef> {
    Ok(Arc::new(InMemoryLedger::new()))
}

async fn apply_operation(
    orchestrator: &TransactionOrchestrator,
    ledger: &LedgerRef,
    record: OperationRecord,
) -> ledgerpay::error::Result<()> {
    match record.op {
        OperationType::Wallet => {
            let wallet = Wallet::new(
                field(record.wallet, "wallet")?,
                field(record.user, "user")?,
                record.note.unwrap_or_default(),
            )?;
            ledger
                .save_wallet(wallet)
                .await
                .map_err(|e| WalletError::create(e, "failed to create wallet"))?;
        }
        OperationType::Account | OperationType::Link => {
            let mut account = LinkedAccount::new(
                field(record.account, "account")?,
                field(record.user, "user")?,
                record.note.unwrap_or_default(),
            );
            if record.op == OperationType::Link {
                account = account.linked();
            }
            ledger
                .save_linked_account(account)
                .await
                .map_err(|e| WalletError::create(e, "failed to create linked account"))?;
        }
        OperationType::Deposit => {
            orchestrator
                .deposit(
                    &field(record.wallet, "wallet")?,
                    &field(record.account, "account")?,
                    field(record.amount, "amount")?,
                    &field(record.currency, "currency")?,
                    &record.note.unwrap_or_default(),
                )
                .await?;
        }
        OperationType::Withdraw => {
            orchestrator
                .withdraw(
                    &field(record.wallet, "wallet")?,
                    &field(record.account, "account")?,
                    field(record.amount, "amount")?,
                    &field(record.currency, "currency")?,
                    &record.note.unwrap_or_default(),
                )
                .await?;
        }
        OperationType::Settle => {
            settle_pending(orchestrator, ledger).await?;
        }
    }
    Ok(())
}

/// Settles every transaction currently pending in the ledger, including
/// transactions left over from earlier runs against a persistent store.
async fn settle_pending(
    orchestrator: &TransactionOrchestrator,
    ledger: &LedgerRef,
) -> ledgerpay::error::Result<()> {
    let wallets = ledger
        .list_wallets()
        .await
        .map_err(|e| WalletError::get(e, "failed to list wallets"))?;
    for wallet in wallets {
        let transactions = ledger
            .transactions_for_wallet(&wallet.id)
            .await
            .map_err(|e| WalletError::get(e, "failed to list wallet transactions"))?;
        for tx in transactions
            .into_iter()
            .filter(|tx| tx.status == TransactionStatus::New)
        {
            orchestrator.pay_transaction(&tx.id).await?;
        }
    }
    Ok(())
}

fn field<T>(value: Option<T>, name: &str) -> ledgerpay::error::Result<T> {
    value.ok_or_else(|| WalletError::invalid_params(format!("{name} is required")))
}
