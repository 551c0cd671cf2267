//! # Payment confirmation signature format
//!
//! When the payer completes the gateway's hosted checkout flow, the gateway hands the client a confirmation
//! payload containing the order id, the payment id, and a signature. The signature is what proves the
//! confirmation actually came from the gateway rather than being fabricated by the client, so it gates every
//! write the payment verifier performs.
//!
//! ## Message format
//!
//! The signed message is the order id and the payment id concatenated with a pipe:
//!
//! ```text
//!    {order_id}|{payment_id}
//! ```
//!
//! The signature is HMAC-SHA256 over that message using the merchant's gateway key secret, rendered as lowercase
//! hex. Verification decodes the supplied hex and uses the MAC's own constant-time comparison, so a signature
//! check never leaks how many bytes matched.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::db_types::{OrderId, PaymentConfirmation};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackSignature {
    pub order_id: OrderId,
    pub payment_id: String,
    pub signature: String,
}

impl CallbackSignature {
    pub fn new(order_id: OrderId, payment_id: impl Into<String>, signature: impl Into<String>) -> Self {
        Self { order_id, payment_id: payment_id.into(), signature: signature.into() }
    }

    pub fn message(&self) -> String {
        signature_message(&self.order_id, &self.payment_id)
    }

    /// Checks the supplied signature against the shared secret. Returns false for a wrong signature and for a
    /// signature that is not valid hex at all.
    pub fn is_valid(&self, secret: &str) -> bool {
        let Ok(supplied) = hex::decode(&self.signature) else {
            return false;
        };
        let mut mac = new_mac(secret);
        mac.update(self.message().as_bytes());
        mac.verify_slice(&supplied).is_ok()
    }
}

impl From<&PaymentConfirmation> for CallbackSignature {
    fn from(confirmation: &PaymentConfirmation) -> Self {
        Self::new(confirmation.order_id.clone(), confirmation.payment_id.clone(), confirmation.signature.clone())
    }
}

pub fn signature_message(order_id: &OrderId, payment_id: &str) -> String {
    format!("{}|{payment_id}", order_id.as_str())
}

/// Produces the hex signature the gateway would issue for the given transaction ids. Used by tests and tooling;
/// the server only ever verifies.
pub fn sign_confirmation(order_id: &OrderId, payment_id: &str, secret: &str) -> String {
    let mut mac = new_mac(secret);
    mac.update(signature_message(order_id, payment_id).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn new_mac(secret: &str) -> HmacSha256 {
    // HMAC-SHA256 accepts keys of any length
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length")
}
