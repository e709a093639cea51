use super::super::ledger_response::token::TokenResponse;
use super::request_common::{LedgerRequestMethod, LedgerRequestType, NoBodyLedgerRequestType};

#[derive(Debug)]
pub(crate) struct TokenRequest {}

impl NoBodyLedgerRequestType for TokenRequest {}

impl LedgerRequestType for TokenRequest {
    type Response = TokenResponse;
    fn endpoint(&self) -> String { String::from("/records/token") }
    fn request_method(&self) -> LedgerRequestMethod { LedgerRequestMethod::Get }
}
