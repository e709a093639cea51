use super::super::ledger_response::latest::LatestResponse;
use super::request_common::{LedgerRequestMethod, LedgerRequestType, NoBodyLedgerRequestType};

#[derive(Debug)]
pub(crate) struct LatestRequest {
    pub(crate) aircraft_id: String,
}

impl NoBodyLedgerRequestType for LatestRequest {}

impl LedgerRequestType for LatestRequest {
    type Response = LatestResponse;
    fn endpoint(&self) -> String { format!("/records/latest/{}", self.aircraft_id) }
    fn request_method(&self) -> LedgerRequestMethod { LedgerRequestMethod::Get }
}
