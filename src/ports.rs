//! Ledger store contract consumed by the settlement engine and wallet
//! service. Each adapter supplies its own atomicity: the Postgres
//! implementation wraps multi-statement operations in a database
//! transaction, the in-memory test store in a single locked section.
//! Either way, `settle_credit` and `withdraw` are all-or-nothing units.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Transaction, Wallet};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("wallet {0} not found")]
    WalletNotFound(Uuid),

    #[error("insufficient balance in wallet {0}")]
    InsufficientBalance(Uuid),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::Storage(e.to_string())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// What the atomic credit step observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditOutcome {
    /// This call won the pending -> completed transition and credited
    /// the wallet.
    Credited,
    /// The transaction was already terminal; nothing was changed.
    AlreadySettled,
    NotFound,
}

/// What the mark-failed step observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOutcome {
    MarkedFailed,
    /// The transaction had already left `PENDING`; terminal statuses are
    /// never overwritten.
    AlreadySettled,
    NotFound,
}

#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn find_transaction(&self, id: Uuid) -> LedgerResult<Option<Transaction>>;

    async fn find_wallet(&self, id: Uuid) -> LedgerResult<Option<Wallet>>;

    /// Atomically transition the transaction `PENDING -> COMPLETED` and
    /// credit its amount to the owning wallet. The transition must be a
    /// storage-level conditional update: under concurrent duplicate
    /// deliveries exactly one caller may observe `Credited`.
    async fn settle_credit(&self, id: Uuid) -> LedgerResult<CreditOutcome>;

    /// Transition the transaction `PENDING -> FAILED`. No balance change.
    async fn settle_failure(&self, id: Uuid) -> LedgerResult<FailOutcome>;

    /// Record a new pending deposit awaiting gateway settlement.
    async fn insert_pending_deposit(
        &self,
        wallet_id: Uuid,
        amount: BigDecimal,
    ) -> LedgerResult<Transaction>;

    /// Atomically debit the wallet and record the completed withdrawal.
    /// The sufficiency check (`balance >= amount`) is evaluated inside
    /// the same atomic unit as the decrement.
    async fn withdraw(&self, wallet_id: Uuid, amount: BigDecimal) -> LedgerResult<Transaction>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> LedgerResult<()>;
}
