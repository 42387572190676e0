use sha2::{Digest, Sha512};

/// Verifies that an inbound payment notification was produced by the
/// gateway. The gateway signs each notification with
/// `sha512(order_id || status_code || gross_amount || server_key)`,
/// hex-encoded.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    server_key: String,
}

impl SignatureVerifier {
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            server_key: server_key.into(),
        }
    }

    /// Pure over its inputs and the configured key. An empty key never
    /// verifies: a misconfigured deployment must fail closed rather than
    /// accept signatures computed over an empty secret.
    pub fn verify(
        &self,
        order_id: &str,
        status_code: &str,
        gross_amount: &str,
        provided: &str,
    ) -> bool {
        if self.server_key.is_empty() {
            return false;
        }

        let mut hasher = Sha512::new();
        hasher.update(order_id.as_bytes());
        hasher.update(status_code.as_bytes());
        hasher.update(gross_amount.as_bytes());
        hasher.update(self.server_key.as_bytes());
        let expected = hex::encode(hasher.finalize());

        constant_time_eq(expected.as_bytes(), provided.as_bytes())
    }
}

// Equality that does not leak how many leading bytes match. Length is
// public (the digest width), so the early return on mismatched lengths
// reveals nothing about the key.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
