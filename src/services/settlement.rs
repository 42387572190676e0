use std::sync::Arc;
use uuid::Uuid;

use crate::ports::{CreditOutcome, FailOutcome, LedgerError, LedgerStore};

/// Decision applied for a verified gateway notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// The transaction completed and its wallet was credited.
    Credited,
    /// The transaction was marked failed. No balance change.
    MarkedFailed,
    /// The gateway reports the payment still in flight.
    Pending,
    /// Nothing to do: a replay of an already-settled transaction or an
    /// unrecognized gateway status.
    NoOp,
    /// No transaction matches the order reference.
    NotFound,
}

impl SettlementOutcome {
    /// Acknowledgement text returned to the gateway.
    pub fn message(&self) -> &'static str {
        match self {
            SettlementOutcome::Credited => "transaction settled",
            SettlementOutcome::MarkedFailed => "transaction marked as failed",
            SettlementOutcome::Pending => "transaction pending",
            SettlementOutcome::NoOp => "notification acknowledged",
            SettlementOutcome::NotFound => "transaction not found",
        }
    }
}

/// Gateway `transaction_status` vocabulary mapped to an internal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GatewayAction {
    Credit,
    Fail,
    Pending,
    Unrecognized,
}

impl GatewayAction {
    fn classify(transaction_status: &str) -> Self {
        match transaction_status {
            "capture" | "settlement" => GatewayAction::Credit,
            "cancel" | "deny" | "expire" => GatewayAction::Fail,
            "pending" => GatewayAction::Pending,
            _ => GatewayAction::Unrecognized,
        }
    }
}

/// Applies verified notifications to the ledger. At most one delivery per
/// order id ever credits the wallet; replays, late failure notices for
/// settled transactions, and unknown orders are acknowledged without
/// mutation so the gateway stops retrying them.
#[derive(Clone)]
pub struct SettlementEngine {
    store: Arc<dyn LedgerStore>,
}

impl SettlementEngine {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn settle(
        &self,
        order_id: &str,
        transaction_status: &str,
    ) -> Result<SettlementOutcome, LedgerError> {
        let action = GatewayAction::classify(transaction_status);

        // Order references are transaction UUIDs; anything else (e.g.
        // gateway test traffic) cannot match a row and is acknowledged.
        let id = match Uuid::parse_str(order_id) {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(order_id, "notification for unrecognized order reference");
                return Ok(SettlementOutcome::NotFound);
            }
        };

        match action {
            GatewayAction::Credit => match self.store.settle_credit(id).await? {
                CreditOutcome::Credited => {
                    tracing::info!(%id, "transaction settled, wallet credited");
                    Ok(SettlementOutcome::Credited)
                }
                CreditOutcome::AlreadySettled => {
                    tracing::info!(%id, "replayed settlement notification, no-op");
                    Ok(SettlementOutcome::NoOp)
                }
                CreditOutcome::NotFound => {
                    tracing::warn!(%id, "settlement notification for unknown transaction");
                    Ok(SettlementOutcome::NotFound)
                }
            },
            GatewayAction::Fail => match self.store.settle_failure(id).await? {
                FailOutcome::MarkedFailed => {
                    tracing::info!(%id, status = transaction_status, "transaction marked failed");
                    Ok(SettlementOutcome::MarkedFailed)
                }
                FailOutcome::AlreadySettled => {
                    tracing::info!(
                        %id,
                        status = transaction_status,
                        "failure notification for terminal transaction, no-op"
                    );
                    Ok(SettlementOutcome::NoOp)
                }
                FailOutcome::NotFound => {
                    tracing::warn!(%id, "failure notification for unknown transaction");
                    Ok(SettlementOutcome::NotFound)
                }
            },
            GatewayAction::Pending => {
                tracing::info!(%id, "payment still pending at the gateway");
                Ok(SettlementOutcome::Pending)
            }
            GatewayAction::Unrecognized => {
                tracing::warn!(%id, status = transaction_status, "unrecognized gateway status, acknowledged");
                Ok(SettlementOutcome::NoOp)
            }
        }
    }
}
