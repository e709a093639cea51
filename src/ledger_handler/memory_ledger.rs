use super::ledger::{Confirmation, Ledger, LedgerError};
use crate::submission::sequencer::SequencingToken;
use crate::telemetry::FlightRecord;
use crate::validation::{ValidationConfig, ValidationEngine, Verdict};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-memory reference implementation of the [`Ledger`] contract, used by the
/// demo binary and the tests.
///
/// It honors the same contract the real authority does: append-only record
/// log, independent re-validation of every commit with its own engine,
/// ledger-assigned acceptance timestamps (strictly increasing per aircraft),
/// all-or-nothing group commits, and strictly increasing sequencing tokens
/// where every presented token counts as consumed.
#[derive(Debug)]
pub struct MemoryLedger {
    engine: ValidationEngine,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<FlightRecord>,
    latest: HashMap<String, FlightRecord>,
    last_token: Option<u64>,
    /// Fault injection: the next `n` submissions report `Unavailable`
    /// without being processed (the token is not consumed).
    fail_submissions: u32,
}

impl MemoryLedger {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            engine: ValidationEngine::new(config),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Makes the next `n` submission calls fail as unavailable.
    pub async fn fail_submissions(&self, n: u32) {
        self.inner.lock().await.fail_submissions = n;
    }

    async fn commit(
        &self,
        records: &[FlightRecord],
        token: SequencingToken,
    ) -> Result<Confirmation, LedgerError> {
        let mut inner = self.inner.lock().await;

        if inner.fail_submissions > 0 {
            inner.fail_submissions -= 1;
            return Err(LedgerError::Unavailable);
        }

        // Every processed token is consumed, accepted or not, so a reused
        // token can never silently collide with the original attempt.
        if inner.last_token.is_some_and(|last| token.value() <= last) {
            return Err(LedgerError::Rejected(format!(
                "stale sequencing token {token}"
            )));
        }
        inner.last_token = Some(token.value());

        if records.is_empty() {
            return Err(LedgerError::Rejected(String::from("empty submission")));
        }

        // Stamp acceptance times and re-validate the whole group against a
        // working view of the latest state; one bad member rejects the call.
        let now = Utc::now().timestamp();
        let mut staged = Vec::with_capacity(records.len());
        let mut working = inner.latest.clone();
        for (i, record) in records.iter().enumerate() {
            let previous = working.get(record.aircraft_id());
            let assigned = previous.map_or(now, |prev| now.max(prev.timestamp() + 1));
            let stamped = record.with_timestamp(assigned);
            match self.engine.validate(&stamped, previous) {
                Verdict::Accept => {
                    working.insert(stamped.aircraft_id().to_string(), stamped.clone());
                    staged.push(stamped);
                }
                Verdict::Reject(reason) => {
                    return Err(LedgerError::Rejected(format!(
                        "record {i} ({}): {reason}",
                        record.aircraft_id()
                    )));
                }
            }
        }

        let committed = staged.len();
        inner.records.extend(staged);
        inner.latest = working;
        Ok(Confirmation {
            token: token.value(),
            committed,
            height: inner.records.len() as u64,
            base_timestamp: now,
        })
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn submit_record(
        &self,
        record: &FlightRecord,
        token: SequencingToken,
    ) -> Result<Confirmation, LedgerError> {
        self.commit(std::slice::from_ref(record), token).await
    }

    async fn submit_batch(
        &self,
        records: &[FlightRecord],
        token: SequencingToken,
    ) -> Result<Confirmation, LedgerError> {
        self.commit(records, token).await
    }

    async fn get_latest(&self, aircraft_id: &str) -> Result<Option<FlightRecord>, LedgerError> {
        Ok(self.inner.lock().await.latest.get(aircraft_id).cloned())
    }

    async fn count(&self) -> Result<u64, LedgerError> {
        Ok(self.inner.lock().await.records.len() as u64)
    }

    async fn last_token(&self) -> Result<Option<u64>, LedgerError> {
        Ok(self.inner.lock().await.last_token)
    }

    async fn get_range(&self, start: u64, end: u64) -> Result<Vec<FlightRecord>, LedgerError> {
        let inner = self.inner.lock().await;
        let len = inner.records.len() as u64;
        let start = start.min(len) as usize;
        let end = end.min(len) as usize;
        if start > end {
            return Err(LedgerError::Rejected(String::from("invalid range")));
        }
        Ok(inner.records[start..end].to_vec())
    }
}
