use super::response_common::SerdeJSONBodyLedgerResponseType;

#[derive(serde::Deserialize, Debug)]
pub struct CountResponse {
    count: u64,
}

impl SerdeJSONBodyLedgerResponseType for CountResponse {}

impl CountResponse {
    pub fn count(&self) -> u64 { self.count }
}
