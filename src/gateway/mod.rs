//! Types and verification for the payment gateway's notification webhook.

pub mod notification;
pub mod signature;

pub use notification::{GrossAmount, PaymentNotification};
pub use signature::SignatureVerifier;
