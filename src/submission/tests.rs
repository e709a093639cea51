use super::batch_group::BatchGroup;
use super::report::RecordStatus;
use super::sequencer::Sequencer;
use super::submitter::{BatchSubmitter, SubmitterConfig};
use crate::info;
use crate::ledger_handler::{Ledger, MemoryLedger};
use crate::telemetry::{FlightRecord, ALT_SCALE, DEG_SCALE};
use crate::validation::ValidationConfig;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn fleet_record(i: usize) -> FlightRecord {
    let id = format!("{:06X}", 0xA0_0000 + i);
    FlightRecord::new(
        id.clone(),
        id,
        40 * DEG_SCALE + (i as i64) * 10_000,
        -74 * DEG_SCALE - (i as i64) * 10_000,
        8_000 * ALT_SCALE,
        false,
        0,
        false,
    )
}

fn submitter(ledger: &Arc<MemoryLedger>, config: SubmitterConfig) -> BatchSubmitter {
    let dyn_ledger: Arc<dyn crate::ledger_handler::Ledger> = Arc::clone(ledger) as _;
    BatchSubmitter::new(dyn_ledger, Arc::new(Sequencer::new(0)), config)
}

#[test]
fn test_group_split_preserves_order() {
    let records: Vec<FlightRecord> = (0..5).map(fleet_record).collect();
    let ids: Vec<String> = records.iter().map(|r| r.aircraft_id().to_string()).collect();
    let group = BatchGroup::new(0, records);
    let (head, tail) = group.split();
    assert_eq!(head.indices(), 0..3);
    assert_eq!(tail.indices(), 3..5);
    let rejoined: Vec<&str> = head
        .records()
        .iter()
        .chain(tail.records())
        .map(FlightRecord::aircraft_id)
        .collect();
    assert_eq!(rejoined, ids.iter().map(String::as_str).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_sequencer_issues_unique_tokens() {
    let sequencer = Arc::new(Sequencer::new(0));
    let mut handles = Vec::new();
    for _ in 0..16 {
        let seq = Arc::clone(&sequencer);
        handles.push(tokio::spawn(async move {
            let mut tokens = Vec::new();
            for _ in 0..16 {
                tokens.push(seq.next_token().await.value());
            }
            tokens
        }));
    }
    let mut seen = HashSet::new();
    for handle in handles {
        for token in handle.await.unwrap() {
            assert!(seen.insert(token), "token {token} issued twice");
        }
    }
    assert_eq!(seen.len(), 256);
    assert_eq!(seen.iter().max(), Some(&255));
}

#[tokio::test]
async fn test_poisoned_batch_converges() {
    let ledger = Arc::new(MemoryLedger::new(ValidationConfig::default()));
    // Record #37 carries a non-hex transponder address, so the ledger's own
    // validation poisons every group containing it.
    let mut records: Vec<FlightRecord> = (0..50).map(fleet_record).collect();
    records[36] = FlightRecord::new(
        String::from("ZZZZZZ"),
        String::from("ZZZZZZ"),
        40 * DEG_SCALE,
        -74 * DEG_SCALE,
        8_000 * ALT_SCALE,
        false,
        0,
        false,
    );

    let sub = submitter(&ledger, SubmitterConfig {
        max_retry_rounds: 6,
        ..SubmitterConfig::default()
    });
    let report = sub.submit(records).await;
    info!("poisoned batch report: {report}");

    assert_eq!(report.confirmed_count(), 49);
    assert_eq!(report.failed_groups(), 1);
    // Halving isolates the poisoned record within ceil(log2(50)) + 1 rounds.
    assert!(report.rounds() <= 7, "took {} rounds", report.rounds());
    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].index(), 36);
    assert!(matches!(failed[0].status(), RecordStatus::LedgerRejected(_)));
    assert_eq!(ledger.count().await.unwrap(), 49);
}

#[tokio::test]
async fn test_outage_recovers_by_splitting() {
    let ledger = Arc::new(MemoryLedger::new(ValidationConfig::default()));
    ledger.fail_submissions(1).await;

    let sub = submitter(&ledger, SubmitterConfig::default());
    let report = sub.submit((0..2).map(fleet_record).collect()).await;

    assert!(report.is_complete_success());
    assert_eq!(report.confirmed_count(), 2);
    assert_eq!(report.rounds(), 2);
    // The failed attempt's token was never reused; the retries drew fresh
    // ones and the ledger accepted them.
    assert_eq!(ledger.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_retry_budget_starves_outstanding_groups() {
    let ledger = Arc::new(MemoryLedger::new(ValidationConfig::default()));
    ledger.fail_submissions(100).await;

    let sub = submitter(&ledger, SubmitterConfig {
        max_retry_rounds: 1,
        confirm_timeout: Duration::from_secs(1),
        ..SubmitterConfig::default()
    });
    let report = sub.submit((0..4).map(fleet_record).collect()).await;

    assert_eq!(report.confirmed_count(), 0);
    assert_eq!(report.succeeded_groups(), 0);
    // Nothing is silently dropped: all four records surface individually.
    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 4);
    for outcome in failed {
        assert_eq!(*outcome.status(), RecordStatus::RetryBudgetExhausted);
    }
}

#[tokio::test]
async fn test_empty_submission_is_a_noop() {
    let ledger = Arc::new(MemoryLedger::new(ValidationConfig::default()));
    let sub = submitter(&ledger, SubmitterConfig::default());
    let report = sub.submit(Vec::new()).await;
    assert_eq!(report.outcomes().len(), 0);
    assert_eq!(report.rounds(), 0);
    assert!(report.is_complete_success());
}
