use super::response_common::SerdeJSONBodyLedgerResponseType;
use crate::telemetry::FlightRecord;

#[derive(serde::Deserialize, Debug)]
pub struct RangeResponse {
    records: Vec<FlightRecord>,
}

impl SerdeJSONBodyLedgerResponseType for RangeResponse {}

impl RangeResponse {
    pub fn into_records(self) -> Vec<FlightRecord> { self.records }
}
