//! In-memory LedgerStore used by the integration tests. One locked
//! section per operation stands in for one database transaction, which
//! gives the same serialization the Postgres adapter gets from its
//! conditional updates.
#![allow(dead_code)] // not every test binary uses every helper

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use gigpay_core::domain::{Transaction, TransactionStatus, Wallet};
use gigpay_core::ports::{CreditOutcome, FailOutcome, LedgerError, LedgerResult, LedgerStore};

#[derive(Default)]
pub struct MemoryLedger {
    state: Mutex<State>,
    fail_next_credit: AtomicBool,
}

#[derive(Default)]
struct State {
    wallets: HashMap<Uuid, Wallet>,
    transactions: HashMap<Uuid, Transaction>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_wallet(&self, balance: BigDecimal) -> Uuid {
        let now = Utc::now();
        let wallet = Wallet {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            balance,
            bank_name: None,
            account_number: None,
            account_holder: None,
            created_at: now,
            updated_at: now,
        };
        let id = wallet.id;
        self.state.lock().unwrap().wallets.insert(id, wallet);
        id
    }

    pub fn add_pending_deposit(&self, wallet_id: Uuid, amount: BigDecimal) -> Uuid {
        let tx = Transaction::pending_deposit(wallet_id, amount);
        let id = tx.id;
        self.state.lock().unwrap().transactions.insert(id, tx);
        id
    }

    pub fn balance(&self, wallet_id: Uuid) -> BigDecimal {
        self.state.lock().unwrap().wallets[&wallet_id].balance.clone()
    }

    pub fn status(&self, tx_id: Uuid) -> TransactionStatus {
        self.state.lock().unwrap().transactions[&tx_id].status
    }

    /// Abort the next credit attempt before anything commits, simulating
    /// a storage failure between the status write and the balance write.
    pub fn fail_next_credit(&self) {
        self.fail_next_credit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn find_transaction(&self, id: Uuid) -> LedgerResult<Option<Transaction>> {
        Ok(self.state.lock().unwrap().transactions.get(&id).cloned())
    }

    async fn find_wallet(&self, id: Uuid) -> LedgerResult<Option<Wallet>> {
        Ok(self.state.lock().unwrap().wallets.get(&id).cloned())
    }

    async fn settle_credit(&self, id: Uuid) -> LedgerResult<CreditOutcome> {
        let mut state = self.state.lock().unwrap();

        let Some(tx) = state.transactions.get(&id) else {
            return Ok(CreditOutcome::NotFound);
        };
        if tx.status != TransactionStatus::Pending {
            return Ok(CreditOutcome::AlreadySettled);
        }

        let wallet_id = tx.wallet_id;
        let amount = tx.amount.clone();
        if !state.wallets.contains_key(&wallet_id) {
            return Err(LedgerError::WalletNotFound(wallet_id));
        }

        if self.fail_next_credit.swap(false, Ordering::SeqCst) {
            // Nothing has been applied yet; the "rollback" is to leave
            // the state untouched.
            return Err(LedgerError::Storage("injected credit failure".to_string()));
        }

        let now = Utc::now();
        let tx = state.transactions.get_mut(&id).unwrap();
        tx.status = TransactionStatus::Completed;
        tx.updated_at = now;

        let wallet = state.wallets.get_mut(&wallet_id).unwrap();
        wallet.balance = wallet.balance.clone() + amount;
        wallet.updated_at = now;

        Ok(CreditOutcome::Credited)
    }

    async fn settle_failure(&self, id: Uuid) -> LedgerResult<FailOutcome> {
        let mut state = self.state.lock().unwrap();

        let Some(tx) = state.transactions.get_mut(&id) else {
            return Ok(FailOutcome::NotFound);
        };
        if tx.status != TransactionStatus::Pending {
            return Ok(FailOutcome::AlreadySettled);
        }

        tx.status = TransactionStatus::Failed;
        tx.updated_at = Utc::now();
        Ok(FailOutcome::MarkedFailed)
    }

    async fn insert_pending_deposit(
        &self,
        wallet_id: Uuid,
        amount: BigDecimal,
    ) -> LedgerResult<Transaction> {
        let mut state = self.state.lock().unwrap();

        if !state.wallets.contains_key(&wallet_id) {
            return Err(LedgerError::WalletNotFound(wallet_id));
        }

        let tx = Transaction::pending_deposit(wallet_id, amount);
        state.transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }

    async fn withdraw(&self, wallet_id: Uuid, amount: BigDecimal) -> LedgerResult<Transaction> {
        let mut state = self.state.lock().unwrap();

        let Some(wallet) = state.wallets.get_mut(&wallet_id) else {
            return Err(LedgerError::WalletNotFound(wallet_id));
        };
        if wallet.balance < amount {
            return Err(LedgerError::InsufficientBalance(wallet_id));
        }

        wallet.balance = wallet.balance.clone() - amount.clone();
        wallet.updated_at = Utc::now();

        let tx = Transaction::completed_withdrawal(wallet_id, amount);
        state.transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }

    async fn ping(&self) -> LedgerResult<()> {
        Ok(())
    }
}
