use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: BigDecimal,
}

pub async fn get_wallet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let wallet = state
        .store
        .find_wallet(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Wallet {id} not found")))?;

    Ok(Json(wallet))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tx = state
        .store
        .find_transaction(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction {id} not found")))?;

    Ok(Json(tx))
}

pub async fn initiate_deposit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AmountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tx = state.wallets.initiate_deposit(id, req.amount).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AmountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tx = state.wallets.withdraw(id, req.amount).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}
