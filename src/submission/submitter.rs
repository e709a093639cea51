use super::batch_group::BatchGroup;
use super::report::{GroupOutcome, RecordOutcome, RecordStatus, SubmissionReport};
use super::sequencer::Sequencer;
use crate::ledger_handler::{Confirmation, Ledger, LedgerError};
use crate::telemetry::FlightRecord;
use crate::{event, warn};
use std::sync::Arc;
use std::time::Duration;

/// Submission limits. `max_batch_size` is the hard per-call size/gas budget
/// of the ledger; callers pre-chunk anything larger before handing it over.
#[derive(Debug, Clone, Copy)]
pub struct SubmitterConfig {
    /// Hard upper bound on records per ledger call.
    pub max_batch_size: usize,
    /// Groups at or below this size are not split further.
    pub min_group_size: usize,
    /// Retry rounds after the initial attempt.
    pub max_retry_rounds: u32,
    /// Bounded wait for ledger confirmation per attempt; a timeout counts as
    /// a failure, never as success.
    pub confirm_timeout: Duration,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 50,
            min_group_size: 1,
            max_retry_rounds: 3,
            confirm_timeout: Duration::from_secs(10),
        }
    }
}

/// Commits locally-validated records to the ledger in bounded-size groups,
/// adaptively halving and retrying failed groups.
///
/// Halving rather than one-at-a-time keeps the round count logarithmic while
/// isolating the minority of records actually responsible for a failure —
/// one malformed record cannot permanently poison an otherwise valid batch.
pub struct BatchSubmitter {
    ledger: Arc<dyn Ledger>,
    sequencer: Arc<Sequencer>,
    config: SubmitterConfig,
}

impl BatchSubmitter {
    pub fn new(ledger: Arc<dyn Ledger>, sequencer: Arc<Sequencer>, config: SubmitterConfig) -> Self {
        Self { ledger, sequencer, config }
    }

    pub fn config(&self) -> &SubmitterConfig { &self.config }

    /// Submits `records` and reports a terminal status for every one of
    /// them. Relative order within a group survives every split; across
    /// groups no commit-order guarantee is made (groups commit
    /// independently, the ledger's own re-validation owns any per-aircraft
    /// ordering invariant).
    pub async fn submit(&self, records: Vec<FlightRecord>) -> SubmissionReport {
        if records.is_empty() {
            return SubmissionReport::default();
        }
        if records.len() > self.config.max_batch_size {
            warn!(
                "submission of {} records exceeds the batch budget of {}, caller should pre-chunk",
                records.len(),
                self.config.max_batch_size
            );
        }

        let ids: Vec<String> = records.iter().map(|r| r.aircraft_id().to_string()).collect();
        let mut statuses: Vec<Option<RecordStatus>> = vec![None; records.len()];
        let mut confirmations: Vec<GroupOutcome> = Vec::new();
        let mut failed_groups = 0usize;
        let mut queue = vec![BatchGroup::new(0, records)];
        let mut rounds = 0u32;

        // Initial attempt plus a bounded number of retry rounds. Attempts
        // run sequentially: ledger writes serialize on the sequencing token,
        // so issuing tokens to in-flight calls out of commit order would
        // only manufacture stale-token rejections.
        while !queue.is_empty() && rounds <= self.config.max_retry_rounds {
            rounds += 1;
            let attempts: Vec<BatchGroup> = std::mem::take(&mut queue);
            let mut results = Vec::with_capacity(attempts.len());
            for group in &attempts {
                results.push(self.attempt(group).await);
            }

            for (group, result) in attempts.into_iter().zip(results) {
                match result {
                    Ok(confirmation) => {
                        event!(
                            "group [{}..{}) confirmed: {confirmation}",
                            group.start(),
                            group.start() + group.len()
                        );
                        for i in group.indices() {
                            statuses[i] =
                                Some(RecordStatus::Confirmed { token: confirmation.token });
                        }
                        confirmations.push(GroupOutcome::new(&group, confirmation));
                    }
                    Err(err) if group.len() > self.config.min_group_size => {
                        event!(
                            "group [{}..{}) failed ({err}), splitting",
                            group.start(),
                            group.start() + group.len()
                        );
                        let (head, tail) = group.split();
                        queue.push(head);
                        queue.push(tail);
                    }
                    Err(err) => {
                        // A minimal group that still fails is terminal; its
                        // records are reported, never silently dropped.
                        warn!(
                            "record {} ({}) permanently failed: {err}",
                            group.start(),
                            ids[group.start()]
                        );
                        failed_groups += 1;
                        let status = match err {
                            LedgerError::Rejected(reason) => RecordStatus::LedgerRejected(reason),
                            LedgerError::Unavailable => RecordStatus::RetryBudgetExhausted,
                        };
                        for i in group.indices() {
                            statuses[i] = Some(status.clone());
                        }
                    }
                }
            }
        }

        // Whatever is still queued was starved by the retry bound.
        for group in queue {
            warn!(
                "retry budget exhausted for group [{}..{})",
                group.start(),
                group.start() + group.len()
            );
            failed_groups += 1;
            for i in group.indices() {
                statuses[i] = Some(RecordStatus::RetryBudgetExhausted);
            }
        }

        let outcomes = statuses
            .into_iter()
            .zip(ids)
            .enumerate()
            .map(|(index, (status, aircraft_id))| {
                // Every record got a terminal status above; the fallback only
                // defends the invariant.
                let status = status.unwrap_or(RecordStatus::RetryBudgetExhausted);
                RecordOutcome::new(index, aircraft_id, status)
            })
            .collect();
        SubmissionReport::new(outcomes, confirmations, failed_groups, rounds)
    }

    /// One ledger call for one group, under a fresh sequencing token and a
    /// bounded confirmation wait. A stale token is never reused: even a
    /// failed attempt consumed its token.
    async fn attempt(&self, group: &BatchGroup) -> Result<Confirmation, LedgerError> {
        let token = self.sequencer.next_token().await;
        let call = async {
            if group.len() == 1 {
                self.ledger.submit_record(&group.records()[0], token).await
            } else {
                self.ledger.submit_batch(group.records(), token).await
            }
        };
        match tokio::time::timeout(self.config.confirm_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(LedgerError::Unavailable),
        }
    }
}
