use crate::error::WalletError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg};

/// A positive monetary magnitude carried by one transaction.
///
/// Construction is the validation point: an `Amount` can never hold zero or a
/// negative value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, WalletError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(WalletError::invalid_params(
                "amount must be greater than zero",
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A signed monetary value derived from the ledger.
///
/// Unlike `Amount` this carries a sign: withdrawals enter the ledger fold as
/// negative contributions, and an over-drawn wallet would show a negative
/// balance.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Whether the balance is sufficient to pay out `amount`.
    pub fn covers(&self, amount: Amount) -> bool {
        self.0 >= amount.0
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

// The two operations the ledger fold needs: summing contributions and
// flipping the sign of an outbound movement.
impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Neg for Balance {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// A user's wallet.
///
/// Carries identity only. The wallet holds no balance field: balance is the
/// signed sum over its SUCCESSFUL transactions, computed by the ledger
/// repository on read. A wallet is created once during onboarding and is
/// read-only afterwards.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Wallet {
    pub id: String,
    pub user_id: String,
    pub name: String,
}

impl Wallet {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, WalletError> {
        let id = id.into();
        if id.is_empty() {
            return Err(WalletError::invalid_params("wallet id must not be empty"));
        }
        Ok(Self {
            id,
            user_id: user_id.into(),
            name: name.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_fold_operations() {
        let b1 = Balance::new(dec!(10.0));
        let b2 = Balance::new(dec!(5.0));
        assert_eq!(b1 + b2, Balance::new(dec!(15.0)));
        assert_eq!(b1 + -b2, Balance::new(dec!(5.0)));
        assert_eq!(-b1, Balance::new(dec!(-10.0)));
    }

    #[test]
    fn test_balance_covers_amount() {
        let balance = Balance::new(dec!(100.0));
        assert!(balance.covers(Amount::new(dec!(100.0)).unwrap()));
        assert!(balance.covers(Amount::new(dec!(99.99)).unwrap()));
        assert!(!balance.covers(Amount::new(dec!(100.01)).unwrap()));
        assert!(!Balance::new(dec!(-5.0)).covers(Amount::new(dec!(1.0)).unwrap()));
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(WalletError::InvalidParams(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(WalletError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_wallet_requires_id() {
        assert!(Wallet::new("w1", "u1", "main").is_ok());
        assert!(matches!(
            Wallet::new("", "u1", "main"),
            Err(WalletError::InvalidParams(_))
        ));
    }
}
