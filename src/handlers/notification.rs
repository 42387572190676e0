use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::AppState;
use crate::error::AppError;
use crate::gateway::PaymentNotification;

/// Payment gateway notification webhook.
///
/// The gateway retries on any non-2xx response, so every settlement
/// outcome is acknowledged with 200, including replays and unknown
/// orders. Only a bad signature (403) and internal failures (500) are
/// reported; a 500 is what prompts the gateway to redeliver.
pub async fn notification(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    // Decoded by hand rather than via the Json extractor: a body this
    // service cannot read is reported as a server error so the gateway
    // retries, not as a client error.
    let payload: PaymentNotification = serde_json::from_slice(&body)
        .map_err(|e| AppError::Internal(format!("malformed notification payload: {e}")))?;

    let gross_amount = payload.gross_amount.as_signature_input();
    if !state.verifier.verify(
        &payload.order_id,
        &payload.status_code,
        gross_amount.as_ref(),
        &payload.signature_key,
    ) {
        tracing::warn!(order_id = %payload.order_id, "rejected notification with invalid signature");
        return Err(AppError::InvalidSignature);
    }

    let outcome = state
        .engine
        .settle(&payload.order_id, &payload.transaction_status)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "message": outcome.message() }))))
}
