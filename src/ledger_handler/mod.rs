pub use chrono;
pub use reqwest;
pub use serde;

pub mod ledger;
pub mod ledger_client;
pub mod ledger_request;
pub mod ledger_response;
pub mod memory_ledger;
#[cfg(test)]
mod tests;

pub use ledger::{Confirmation, Ledger, LedgerError, RestLedger};
pub use ledger_client::LedgerClient;
pub use memory_ledger::MemoryLedger;
