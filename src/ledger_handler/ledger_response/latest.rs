use super::response_common::SerdeJSONBodyLedgerResponseType;
use crate::telemetry::FlightRecord;

#[derive(serde::Deserialize, Debug)]
pub struct LatestResponse {
    record: FlightRecord,
}

impl SerdeJSONBodyLedgerResponseType for LatestResponse {}

impl LatestResponse {
    pub fn into_record(self) -> FlightRecord { self.record }
}
