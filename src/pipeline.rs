use crate::attack::{self, AttackKind};
use crate::keychain::Keychain;
use crate::ledger_handler::{Confirmation, LedgerError};
use crate::submission::{RecordStatus, SubmissionReport};
use crate::telemetry::{CandidateUpdate, FlightRecord};
use crate::validation::{RejectReason, Verdict};
use crate::{atk, event, info, warn};
use chrono::Utc;
use std::collections::HashSet;
use tokio::sync::Mutex;

/// End-to-end result of feeding one forged record through the normal
/// validate-then-submit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The local engine caught it before any ledger traffic.
    RejectedLocally(RejectReason),
    /// It slipped past the pre-filter but the authority refused it.
    RejectedByLedger(String),
    /// The ledger could not be reached inside the retry budget.
    Undelivered,
    /// It landed. The plausibility ceilings are mistuned for this aircraft.
    Committed(Confirmation),
}

impl std::fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttackOutcome::RejectedLocally(reason) => write!(f, "rejected locally: {reason}"),
            AttackOutcome::RejectedByLedger(reason) => write!(f, "rejected by ledger: {reason}"),
            AttackOutcome::Undelivered => write!(f, "undelivered"),
            AttackOutcome::Committed(confirmation) => write!(f, "COMMITTED: {confirmation}"),
        }
    }
}

/// The surface the feed/relay layers talk to: validate candidates into a
/// pending queue, flush the queue to the ledger in bounded batches, and run
/// attack simulations through the identical path.
pub struct Pipeline {
    keychain: Keychain,
    pending: Mutex<Vec<FlightRecord>>,
}

impl Pipeline {
    pub fn new(keychain: Keychain) -> Self {
        Self { keychain, pending: Mutex::new(Vec::new()) }
    }

    pub fn keychain(&self) -> &Keychain { &self.keychain }

    /// Rebuilds the per-aircraft state cache and the token sequencer from
    /// the ledger. Must run before traffic is accepted, otherwise validation
    /// compares against nothing after a restart.
    pub async fn rebuild_state(&self) -> Result<(), LedgerError> {
        let ledger = self.keychain.ledger();
        let total = ledger.count().await?;
        let records = ledger.get_range(0, total).await?;
        self.keychain.store().rebuild(records).await;
        // Resume above the last consumed token, not the record count: the
        // ledger consumes tokens on rejected and failed calls too, so the
        // count can undershoot and a count-based floor would reissue a
        // stale token.
        let floor = ledger.last_token().await?.map_or(0, |t| t + 1);
        self.keychain.sequencer().resync(floor).await;
        info!(
            "state cache rebuilt: {} aircraft from {total} ledger records, next token #{floor}",
            self.keychain.store().len().await
        );
        Ok(())
    }

    /// Stamps the candidate with its projected acceptance time, validates it
    /// against the latest accepted record and queues it when it passes.
    /// Rejections are terminal for the candidate — bad data is never
    /// retried.
    pub async fn validate_and_queue(&self, candidate: CandidateUpdate) -> Verdict {
        let record = candidate.into_record(Utc::now());
        let verdict = self.vet(&record).await;
        match verdict {
            Verdict::Accept => {
                event!("queued {record}");
                self.pending.lock().await.push(record);
            }
            Verdict::Reject(reason) => warn!("rejected {record}: {reason}"),
        }
        verdict
    }

    pub async fn pending_count(&self) -> usize { self.pending.lock().await.len() }

    /// Flushes up to `max_batch` pending records (further capped by the
    /// submitter's own batch budget) and absorbs confirmed records into the
    /// state store. Returns the per-record report.
    pub async fn submit_pending(&self, max_batch: usize) -> SubmissionReport {
        let chunk: Vec<FlightRecord> = {
            let mut pending = self.pending.lock().await;
            let n = max_batch
                .min(self.keychain.submitter().config().max_batch_size)
                .min(pending.len());
            pending.drain(..n).collect()
        };
        if chunk.is_empty() {
            return SubmissionReport::default();
        }
        let report = self.keychain.submitter().submit(chunk).await;
        self.absorb_confirmed(&report).await;
        report
    }

    /// Forges the given attack variant of `target` (normally the latest
    /// accepted record for an aircraft) and pushes it through the same
    /// validate-then-submit path as real traffic.
    pub async fn simulate_attack(&self, kind: AttackKind, target: &FlightRecord) -> AttackOutcome {
        let forged = attack::forge(kind, target);
        atk!("{kind} attack on {}: forged {forged}", target.aircraft_id());
        if let Verdict::Reject(reason) = self.vet(&forged).await {
            let outcome = AttackOutcome::RejectedLocally(reason);
            atk!("{kind} attack {outcome}");
            return outcome;
        }
        // Past the pre-filter; the ledger stays the final arbiter.
        let report = self.keychain.submitter().submit(vec![forged]).await;
        self.absorb_confirmed(&report).await;
        let outcome = match report.outcomes().first().map(|o| o.status().clone()) {
            Some(RecordStatus::Confirmed { .. }) => {
                let confirmation = report.confirmations()[0].confirmation().clone();
                AttackOutcome::Committed(confirmation)
            }
            Some(RecordStatus::LedgerRejected(reason)) => AttackOutcome::RejectedByLedger(reason),
            _ => AttackOutcome::Undelivered,
        };
        atk!("{kind} attack {outcome}");
        outcome
    }

    async fn vet(&self, record: &FlightRecord) -> Verdict {
        let previous = self.keychain.store().get(record.aircraft_id()).await;
        self.keychain.engine().validate(record, previous.as_ref())
    }

    /// Pulls the ledger-assigned version of every confirmed record into the
    /// state store. Local projected timestamps must not linger there: the
    /// ledger's acceptance time is the one the next validation compares
    /// against.
    async fn absorb_confirmed(&self, report: &SubmissionReport) {
        let ledger = self.keychain.ledger();
        let store = self.keychain.store();
        let mut refreshed: HashSet<&str> = HashSet::new();
        for outcome in report.outcomes() {
            if !outcome.status().is_confirmed() || !refreshed.insert(outcome.aircraft_id()) {
                continue;
            }
            match ledger.get_latest(outcome.aircraft_id()).await {
                Ok(Some(record)) => store.put(record).await,
                Ok(None) => warn!(
                    "confirmed aircraft {} has no ledger record, cache left stale",
                    outcome.aircraft_id()
                ),
                Err(err) => warn!(
                    "could not refresh state for {}: {err}",
                    outcome.aircraft_id()
                ),
            }
        }
    }
}
