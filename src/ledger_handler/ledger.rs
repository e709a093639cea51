use super::ledger_client::LedgerClient;
use super::ledger_request::count_get::CountRequest;
use super::ledger_request::latest_get::LatestRequest;
use super::ledger_request::range_get::RangeRequest;
use super::ledger_request::request_common::{JSONBodyLedgerRequestType, NoBodyLedgerRequestType};
use super::ledger_request::submit_batch_post::SubmitBatchRequest;
use super::ledger_request::submit_record_post::SubmitRecordRequest;
use super::ledger_request::token_get::TokenRequest;
use super::ledger_response::response_common::ResponseError;
use super::ledger_response::submission::SubmissionResponse;
use crate::submission::sequencer::SequencingToken;
use crate::telemetry::FlightRecord;
use async_trait::async_trait;
use std::sync::Arc;
use strum_macros::Display;

/// Why a ledger call did not commit.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LedgerError {
    /// The ledger's own validation refused the call (terminal for the call,
    /// but a split may still isolate the offending record).
    Rejected(String),
    /// Network failure or confirmation timeout; retried via splitting.
    Unavailable,
}

impl std::error::Error for LedgerError {}

impl From<ResponseError> for LedgerError {
    fn from(value: ResponseError) -> Self {
        match value {
            ResponseError::Rejected(body) => LedgerError::Rejected(body.reason().to_string()),
            ResponseError::NotFound => LedgerError::Rejected(String::from("not found")),
            ResponseError::InternalServer | ResponseError::NoConnection | ResponseError::Unknown => {
                LedgerError::Unavailable
            }
        }
    }
}

/// Durability acknowledgement for one committed group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// The sequencing token the call was made with.
    pub token: u64,
    /// Number of records committed by the call.
    pub committed: usize,
    /// Ledger height after the commit.
    pub height: u64,
    /// Ledger-assigned acceptance time of the call (seconds since epoch).
    pub base_timestamp: i64,
}

impl From<SubmissionResponse> for Confirmation {
    fn from(value: SubmissionResponse) -> Self {
        Confirmation {
            token: value.token(),
            committed: value.committed(),
            height: value.height(),
            base_timestamp: value.base_timestamp(),
        }
    }
}

impl std::fmt::Display for Confirmation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} record(s) committed at height {} (token {})",
            self.committed, self.height, self.token
        )
    }
}

/// Contract of the external append-only ledger. The ledger independently
/// re-runs equivalent plausibility checks at commit time — the local
/// [`crate::validation::ValidationEngine`] is a pre-filter, never the sole
/// authority.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Single-record commit.
    async fn submit_record(
        &self,
        record: &FlightRecord,
        token: SequencingToken,
    ) -> Result<Confirmation, LedgerError>;

    /// Group commit, all-or-nothing per call.
    async fn submit_batch(
        &self,
        records: &[FlightRecord],
        token: SequencingToken,
    ) -> Result<Confirmation, LedgerError>;

    async fn get_latest(&self, aircraft_id: &str) -> Result<Option<FlightRecord>, LedgerError>;

    async fn count(&self) -> Result<u64, LedgerError>;

    /// Highest sequencing token consumed so far, accepted or not; `None` on
    /// a fresh ledger. Distinct from `count()`: rejected and failed calls
    /// consume their token without appending a record.
    async fn last_token(&self) -> Result<Option<u64>, LedgerError>;

    /// Records `[start, end)` in ledger order.
    async fn get_range(&self, start: u64, end: u64) -> Result<Vec<FlightRecord>, LedgerError>;
}

/// The production seam: a ledger reached over its REST API.
#[derive(Debug)]
pub struct RestLedger {
    client: Arc<LedgerClient>,
}

impl RestLedger {
    pub fn new(base_url: &str) -> Self {
        Self { client: Arc::new(LedgerClient::new(base_url)) }
    }
}

#[async_trait]
impl Ledger for RestLedger {
    async fn submit_record(
        &self,
        record: &FlightRecord,
        token: SequencingToken,
    ) -> Result<Confirmation, LedgerError> {
        let req = SubmitRecordRequest { record: record.clone(), token: token.value() };
        Ok(req.send_request(&self.client).await.map(Confirmation::from)?)
    }

    async fn submit_batch(
        &self,
        records: &[FlightRecord],
        token: SequencingToken,
    ) -> Result<Confirmation, LedgerError> {
        let req = SubmitBatchRequest { records: records.to_vec(), token: token.value() };
        Ok(req.send_request(&self.client).await.map(Confirmation::from)?)
    }

    async fn get_latest(&self, aircraft_id: &str) -> Result<Option<FlightRecord>, LedgerError> {
        let req = LatestRequest { aircraft_id: aircraft_id.to_string() };
        match req.send_request(&self.client).await {
            Ok(resp) => Ok(Some(resp.into_record())),
            Err(ResponseError::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn count(&self) -> Result<u64, LedgerError> {
        Ok(CountRequest {}.send_request(&self.client).await?.count())
    }

    async fn last_token(&self) -> Result<Option<u64>, LedgerError> {
        Ok(TokenRequest {}.send_request(&self.client).await?.last_token())
    }

    async fn get_range(&self, start: u64, end: u64) -> Result<Vec<FlightRecord>, LedgerError> {
        let req = RangeRequest { start, end };
        Ok(req.send_request(&self.client).await?.into_records())
    }
}
