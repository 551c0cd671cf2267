mod callback_signature;

pub use callback_signature::{sign_confirmation, CallbackSignature};
