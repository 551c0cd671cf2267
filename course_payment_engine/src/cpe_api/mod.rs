pub mod errors;
pub mod ledger_api;
pub mod order_api;
pub mod payment_flow_api;
