use super::response_common::SerdeJSONBodyLedgerResponseType;

/// Returned by both commit endpoints once the ledger acknowledges
/// durability of the call.
#[derive(serde::Deserialize, Debug)]
pub struct SubmissionResponse {
    token: u64,
    committed: usize,
    height: u64,
    base_timestamp: i64,
}

impl SerdeJSONBodyLedgerResponseType for SubmissionResponse {}

impl SubmissionResponse {
    pub fn token(&self) -> u64 { self.token }
    pub fn committed(&self) -> usize { self.committed }
    pub fn height(&self) -> u64 { self.height }
    pub fn base_timestamp(&self) -> i64 { self.base_timestamp }
}
