use serde::{Deserialize, Serialize};

/// An external funding source or destination (bank account, e-wallet) a user
/// has registered.
///
/// Only consulted to validate that a movement has a real counterpart account;
/// the provider call itself is currency/amount based and does not read it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct LinkedAccount {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub is_linked: bool,
}

impl LinkedAccount {
    /// Creates an account that has been registered but not yet verified as a
    /// funding source.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            name: name.into(),
            is_linked: false,
        }
    }

    /// Marks the account as usable for deposits and withdrawals.
    pub fn linked(mut self) -> Self {
        self.is_linked = true;
        self
    }
}
