use crate::domain::ports::PaymentProvider;
use crate::domain::wallet::Amount;
use crate::error::ProviderError;
use async_trait::async_trait;

/// Payment service provider client.
///
/// Stands in for the external settlement rail: every movement is
/// acknowledged and logged. The wire protocol behind a real PSP is out of
/// scope for the core, which only needs the success/failure outcome.
#[derive(Debug, Default, Clone)]
pub struct PspClient;

impl PspClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentProvider for PspClient {
    async fn settle_deposit(
        &self,
        amount: Amount,
        currency: &str,
        note: &str,
    ) -> Result<(), ProviderError> {
        tracing::info!(%amount, currency, note, "psp settled deposit");
        Ok(())
    }

    async fn settle_withdrawal(
        &self,
        amount: Amount,
        currency: &str,
        note: &str,
    ) -> Result<(), ProviderError> {
        tracing::info!(%amount, currency, note, "psp settled withdrawal");
        Ok(())
    }
}
