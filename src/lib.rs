pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod ports;
pub mod services;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::gateway::SignatureVerifier;
use crate::ports::LedgerStore;
use crate::services::{SettlementEngine, WalletService};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LedgerStore>,
    pub verifier: Arc<SignatureVerifier>,
    pub engine: SettlementEngine,
    pub wallets: WalletService,
}

impl AppState {
    pub fn new(store: Arc<dyn LedgerStore>, verifier: SignatureVerifier) -> Self {
        Self {
            engine: SettlementEngine::new(store.clone()),
            wallets: WalletService::new(store.clone()),
            verifier: Arc::new(verifier),
            store,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/payments/notification",
            post(handlers::notification::notification),
        )
        .route("/wallets/:id", get(handlers::wallets::get_wallet))
        .route(
            "/wallets/:id/deposits",
            post(handlers::wallets::initiate_deposit),
        )
        .route(
            "/wallets/:id/withdrawals",
            post(handlers::wallets::withdraw),
        )
        .route("/transactions/:id", get(handlers::wallets::get_transaction))
        .with_state(state)
}
