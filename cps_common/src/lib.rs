mod money;
mod secret;

pub use money::{Money, MoneyConversionError, CURRENCY_CODE};
pub use secret::Secret;
