//! Adapters that plug the provider REST clients from `provider_tools` into the engine's provider traits.
mod checkout;
mod identity;

pub use checkout::CheckoutClient;
pub use identity::IdentityClient;
