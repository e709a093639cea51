use super::response_common::SerdeJSONBodyLedgerResponseType;

/// Highest sequencing token the ledger has consumed so far; `None` on a
/// fresh ledger.
#[derive(serde::Deserialize, Debug)]
pub struct TokenResponse {
    last_token: Option<u64>,
}

impl SerdeJSONBodyLedgerResponseType for TokenResponse {}

impl TokenResponse {
    pub fn last_token(&self) -> Option<u64> { self.last_token }
}
