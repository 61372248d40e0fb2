use super::wallet::{Amount, Balance};
use crate::error::WalletError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a monetary movement relative to the wallet.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Money entering the wallet (deposit).
    In,
    /// Money leaving the wallet (withdrawal).
    Out,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::In => write!(f, "IN"),
            TransactionKind::Out => write!(f, "OUT"),
        }
    }
}

/// Settlement state of a transaction.
///
/// `New` is the only non-terminal state; the lifecycle is
/// `New -> Successful` or `New -> Failed`, one transition, one direction.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    New,
    Successful,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::New => write!(f, "NEW"),
            TransactionStatus::Successful => write!(f, "SUCCESSFUL"),
            TransactionStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// The immutable record of a single monetary movement.
///
/// Everything but `status` is fixed at creation. The record is never deleted;
/// it is the durable audit trail and the sole source of balance truth.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: String,
    pub wallet_id: String,
    pub account_id: String,
    pub amount: Amount,
    pub currency: String,
    pub kind: TransactionKind,
    pub note: String,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        wallet_id: impl Into<String>,
        account_id: impl Into<String>,
        amount: Amount,
        currency: impl Into<String>,
        kind: TransactionKind,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            wallet_id: wallet_id.into(),
            account_id: account_id.into(),
            amount,
            currency: currency.into(),
            kind,
            note: note.into(),
            status: TransactionStatus::New,
        }
    }

    /// The movement's contribution to the wallet balance: positive for `In`,
    /// negative for `Out`.
    pub fn signed_amount(&self) -> Balance {
        match self.kind {
            TransactionKind::In => self.amount.into(),
            TransactionKind::Out => -Balance::from(self.amount),
        }
    }

    pub fn to_successful(&mut self) -> Result<(), WalletError> {
        self.transition(TransactionStatus::Successful)
    }

    pub fn to_failed(&mut self) -> Result<(), WalletError> {
        self.transition(TransactionStatus::Failed)
    }

    fn transition(&mut self, to: TransactionStatus) -> Result<(), WalletError> {
        if self.status != TransactionStatus::New {
            return Err(WalletError::invalid_params(format!(
                "cannot move transaction status from {} to {}",
                self.status, to
            )));
        }
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample(kind: TransactionKind) -> Transaction {
        Transaction::new(
            "t1",
            "w1",
            "a1",
            Amount::new(dec!(100.0)).unwrap(),
            "USD",
            kind,
            "test",
        )
    }

    #[test]
    fn test_new_transaction_starts_new() {
        assert_eq!(sample(TransactionKind::In).status, TransactionStatus::New);
    }

    #[test]
    fn test_signed_amount_by_kind() {
        assert_eq!(
            sample(TransactionKind::In).signed_amount(),
            Balance::new(dec!(100.0))
        );
        assert_eq!(
            sample(TransactionKind::Out).signed_amount(),
            Balance::new(dec!(-100.0))
        );
    }

    #[test]
    fn test_transition_is_one_shot() {
        let mut tx = sample(TransactionKind::In);
        tx.to_successful().unwrap();
        assert_eq!(tx.status, TransactionStatus::Successful);

        assert!(matches!(
            tx.to_failed(),
            Err(WalletError::InvalidParams(_))
        ));
        assert!(matches!(
            tx.to_successful(),
            Err(WalletError::InvalidParams(_))
        ));
        assert_eq!(tx.status, TransactionStatus::Successful);
    }

    #[test]
    fn test_failed_is_terminal() {
        let mut tx = sample(TransactionKind::Out);
        tx.to_failed().unwrap();
        assert!(tx.to_successful().is_err());
        assert_eq!(tx.status, TransactionStatus::Failed);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&TransactionStatus::Successful).unwrap();
        assert_eq!(json, "\"SUCCESSFUL\"");
        let kind: TransactionKind = serde_json::from_str("\"OUT\"").unwrap();
        assert_eq!(kind, TransactionKind::Out);
    }
}
