//! REST clients for the two external collaborators of the payment flow:
//!
//! * The checkout gateway, which creates payment-provider orders and issues the transaction ids that the
//!   payment verifier later checks signatures against.
//! * The identity provider's user directory, which is consulted when a learner profile has to be materialised
//!   lazily on first purchase.
//!
//! Both clients are thin `reqwest` wrappers with bounded request timeouts. They know nothing about the payment
//! engine; the server crate adapts them onto the engine's provider traits.
mod checkout;
mod config;
mod error;
mod identity;

pub mod data_objects;

pub use checkout::CheckoutApi;
pub use config::{CheckoutConfig, IdentityConfig};
pub use error::ProviderApiError;
pub use identity::IdentityApi;
