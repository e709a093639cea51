use super::super::ledger_response::submission::SubmissionResponse;
use super::request_common::{JSONBodyLedgerRequestType, LedgerRequestMethod, LedgerRequestType};
use crate::telemetry::FlightRecord;

/// Request type for the group commit endpoint. Semantics are all-or-nothing
/// per call: the ledger rejects the entire group if any member fails its own
/// validation.
#[derive(Debug)]
pub(crate) struct SubmitBatchRequest {
    pub(crate) records: Vec<FlightRecord>,
    pub(crate) token: u64,
}

impl JSONBodyLedgerRequestType for SubmitBatchRequest {
    type Body = Vec<FlightRecord>;
    fn body(&self) -> &Self::Body { &self.records }
}

impl LedgerRequestType for SubmitBatchRequest {
    type Response = SubmissionResponse;
    fn endpoint(&self) -> String { String::from("/records/batch") }
    fn request_method(&self) -> LedgerRequestMethod { LedgerRequestMethod::Post }
    fn header_params(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.append("sequencing-token", self.token.into());
        headers
    }
}
