pub mod notification;
pub mod wallets;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub ledger: &'static str,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let ledger = match state.store.ping().await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };

    let healthy = ledger == "connected";
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthStatus {
            status: if healthy { "healthy" } else { "unhealthy" },
            version: env!("CARGO_PKG_VERSION"),
            ledger,
        }),
    )
}
