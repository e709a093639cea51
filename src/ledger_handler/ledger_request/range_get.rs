use super::super::ledger_response::range::RangeResponse;
use super::request_common::{LedgerRequestMethod, LedgerRequestType, NoBodyLedgerRequestType};

/// Reads the half-open record range `[start, end)` in ledger order.
#[derive(Debug)]
pub(crate) struct RangeRequest {
    pub(crate) start: u64,
    pub(crate) end: u64,
}

impl NoBodyLedgerRequestType for RangeRequest {}

impl LedgerRequestType for RangeRequest {
    type Response = RangeResponse;
    fn endpoint(&self) -> String { format!("/records/range/{}/{}", self.start, self.end) }
    fn request_method(&self) -> LedgerRequestMethod { LedgerRequestMethod::Get }
}
