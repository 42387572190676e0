use bigdecimal::BigDecimal;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::Transaction;
use crate::ports::{LedgerError, LedgerStore};

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Wallet mutation paths outside the webhook: deposit initiation and
/// withdrawal. Both go through the ledger store's atomic operations so
/// the balance is never touched without a matching transaction record.
#[derive(Clone)]
pub struct WalletService {
    store: Arc<dyn LedgerStore>,
}

impl WalletService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Create the pending deposit transaction whose id is handed to the
    /// gateway as the order reference. The balance is untouched until the
    /// settlement engine credits it.
    pub async fn initiate_deposit(
        &self,
        wallet_id: Uuid,
        amount: BigDecimal,
    ) -> Result<Transaction, WalletError> {
        if amount <= BigDecimal::from(0) {
            return Err(WalletError::NonPositiveAmount);
        }
        let tx = self.store.insert_pending_deposit(wallet_id, amount).await?;
        tracing::info!(id = %tx.id, wallet = %wallet_id, "deposit initiated");
        Ok(tx)
    }

    /// Debit the wallet and record the completed withdrawal in one atomic
    /// unit. Fails without mutation if the balance is insufficient.
    pub async fn withdraw(
        &self,
        wallet_id: Uuid,
        amount: BigDecimal,
    ) -> Result<Transaction, WalletError> {
        if amount <= BigDecimal::from(0) {
            return Err(WalletError::NonPositiveAmount);
        }
        let tx = self.store.withdraw(wallet_id, amount).await?;
        tracing::info!(id = %tx.id, wallet = %wallet_id, "withdrawal recorded");
        Ok(tx)
    }
}
