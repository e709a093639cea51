use super::super::ledger_response::submission::SubmissionResponse;
use super::request_common::{JSONBodyLedgerRequestType, LedgerRequestMethod, LedgerRequestType};
use crate::telemetry::FlightRecord;

/// Request type for the single-record commit endpoint. The sequencing token
/// travels as a header, the record as the JSON body.
#[derive(Debug)]
pub(crate) struct SubmitRecordRequest {
    pub(crate) record: FlightRecord,
    pub(crate) token: u64,
}

impl JSONBodyLedgerRequestType for SubmitRecordRequest {
    type Body = FlightRecord;
    fn body(&self) -> &Self::Body { &self.record }
}

impl LedgerRequestType for SubmitRecordRequest {
    type Response = SubmissionResponse;
    fn endpoint(&self) -> String { String::from("/records") }
    fn request_method(&self) -> LedgerRequestMethod { LedgerRequestMethod::Post }
    fn header_params(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.append("sequencing-token", self.token.into());
        headers
    }
}
