use serde::Deserialize;
use std::borrow::Cow;

/// Payment notification as delivered by the gateway webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentNotification {
    pub order_id: String,
    pub status_code: String,
    pub gross_amount: GrossAmount,
    pub signature_key: String,
    pub transaction_status: String,
}

/// The gateway serializes the amount as either a string or a bare JSON
/// number, and signs the textual form as sent. The exact lexical
/// representation must therefore be preserved for signature input.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GrossAmount {
    Text(String),
    Number(serde_json::Number),
}

impl GrossAmount {
    pub fn as_signature_input(&self) -> Cow<'_, str> {
        match self {
            GrossAmount::Text(s) => Cow::Borrowed(s.as_str()),
            GrossAmount::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}
