//! Postgres implementation of LedgerStore.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Transaction, Wallet};
use crate::ports::{CreditOutcome, FailOutcome, LedgerError, LedgerResult, LedgerStore};

/// Postgres-backed ledger. Balances live in `wallets`, movements in
/// `transactions`; every multi-row mutation runs inside one database
/// transaction.
#[derive(Clone)]
pub struct PostgresLedger {
    pool: PgPool,
}

impl PostgresLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn transaction_exists(&self, id: Uuid) -> LedgerResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl LedgerStore for PostgresLedger {
    async fn find_transaction(&self, id: Uuid) -> LedgerResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TransactionRow::into_domain).transpose()
    }

    async fn find_wallet(&self, id: Uuid) -> LedgerResult<Option<Wallet>> {
        let row = sqlx::query_as::<_, WalletRow>("SELECT * FROM wallets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(WalletRow::into_domain))
    }

    async fn settle_credit(&self, id: Uuid) -> LedgerResult<CreditOutcome> {
        let mut dbtx = self.pool.begin().await?;

        // Conditional update on the status column, not read-then-write:
        // under concurrent duplicate deliveries exactly one statement
        // matches the pending row, and the losers see zero rows.
        let settled = sqlx::query_as::<_, (Uuid, BigDecimal)>(
            r#"
            UPDATE transactions
            SET status = 'completed', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING wallet_id, amount
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *dbtx)
        .await?;

        let Some((wallet_id, amount)) = settled else {
            dbtx.rollback().await?;
            return Ok(if self.transaction_exists(id).await? {
                CreditOutcome::AlreadySettled
            } else {
                CreditOutcome::NotFound
            });
        };

        sqlx::query("UPDATE wallets SET balance = balance + $2, updated_at = NOW() WHERE id = $1")
            .bind(wallet_id)
            .bind(&amount)
            .execute(&mut *dbtx)
            .await?;

        dbtx.commit().await?;
        Ok(CreditOutcome::Credited)
    }

    async fn settle_failure(&self, id: Uuid) -> LedgerResult<FailOutcome> {
        let updated = sqlx::query(
            r#"
            UPDATE transactions
            SET status = 'failed', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 1 {
            return Ok(FailOutcome::MarkedFailed);
        }

        Ok(if self.transaction_exists(id).await? {
            FailOutcome::AlreadySettled
        } else {
            FailOutcome::NotFound
        })
    }

    async fn insert_pending_deposit(
        &self,
        wallet_id: Uuid,
        amount: BigDecimal,
    ) -> LedgerResult<Transaction> {
        let wallet_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM wallets WHERE id = $1")
                .bind(wallet_id)
                .fetch_one(&self.pool)
                .await?;
        if wallet_count == 0 {
            return Err(LedgerError::WalletNotFound(wallet_id));
        }

        let tx = Transaction::pending_deposit(wallet_id, amount);
        insert_transaction(&self.pool, &tx).await?;
        Ok(tx)
    }

    async fn withdraw(&self, wallet_id: Uuid, amount: BigDecimal) -> LedgerResult<Transaction> {
        let mut dbtx = self.pool.begin().await?;

        // Sufficiency check and debit are one statement, so concurrent
        // withdrawals cannot both pass the check and overdraw.
        let debited = sqlx::query(
            r#"
            UPDATE wallets
            SET balance = balance - $2, updated_at = NOW()
            WHERE id = $1 AND balance >= $2
            "#,
        )
        .bind(wallet_id)
        .bind(&amount)
        .execute(&mut *dbtx)
        .await?;

        if debited.rows_affected() == 0 {
            dbtx.rollback().await?;
            let wallet_count =
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM wallets WHERE id = $1")
                    .bind(wallet_id)
                    .fetch_one(&self.pool)
                    .await?;
            return Err(if wallet_count == 0 {
                LedgerError::WalletNotFound(wallet_id)
            } else {
                LedgerError::InsufficientBalance(wallet_id)
            });
        }

        let tx = Transaction::completed_withdrawal(wallet_id, amount);
        sqlx::query(
            r#"
            INSERT INTO transactions (id, wallet_id, amount, kind, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(tx.id)
        .bind(tx.wallet_id)
        .bind(&tx.amount)
        .bind(tx.kind.as_str())
        .bind(tx.status.as_str())
        .bind(tx.created_at)
        .bind(tx.updated_at)
        .execute(&mut *dbtx)
        .await?;

        dbtx.commit().await?;
        Ok(tx)
    }

    async fn ping(&self) -> LedgerResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

async fn insert_transaction(pool: &PgPool, tx: &Transaction) -> LedgerResult<()> {
    sqlx::query(
        r#"
        INSERT INTO transactions (id, wallet_id, amount, kind, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(tx.id)
    .bind(tx.wallet_id)
    .bind(&tx.amount)
    .bind(tx.kind.as_str())
    .bind(tx.status.as_str())
    .bind(tx.created_at)
    .bind(tx.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    wallet_id: Uuid,
    amount: BigDecimal,
    kind: String,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TransactionRow {
    fn into_domain(self) -> LedgerResult<Transaction> {
        Ok(Transaction {
            id: self.id,
            wallet_id: self.wallet_id,
            amount: self.amount,
            kind: self.kind.parse().map_err(LedgerError::Storage)?,
            status: self.status.parse().map_err(LedgerError::Storage)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WalletRow {
    id: Uuid,
    user_id: Uuid,
    balance: BigDecimal,
    bank_name: Option<String>,
    account_number: Option<String>,
    account_holder: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl WalletRow {
    fn into_domain(self) -> Wallet {
        Wallet {
            id: self.id,
            user_id: self.user_id,
            balance: self.balance,
            bank_name: self.bank_name,
            account_number: self.account_number,
            account_holder: self.account_holder,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
