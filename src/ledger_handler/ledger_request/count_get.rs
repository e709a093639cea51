use super::super::ledger_response::count::CountResponse;
use super::request_common::{LedgerRequestMethod, LedgerRequestType, NoBodyLedgerRequestType};

#[derive(Debug)]
pub(crate) struct CountRequest {}

impl NoBodyLedgerRequestType for CountRequest {}

impl LedgerRequestType for CountRequest {
    type Response = CountResponse;
    fn endpoint(&self) -> String { String::from("/records/count") }
    fn request_method(&self) -> LedgerRequestMethod { LedgerRequestMethod::Get }
}
